//! CSV ingestion and egress.

use crate::error::{CliError, Result};
use remark_annotator::{BatchOutcome, Record};
use std::path::Path;
use tracing::debug;

/// Read records from a CSV file, locating the text column by header name.
///
/// Every data row becomes a `Record` whose identifier is its zero-based
/// position; blank rows are kept here and excluded later by the pipeline's
/// filter. A row shorter than the header yields empty text rather than an
/// error.
pub fn read_records(path: &Path, column: &str) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?;
    let index = headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| CliError::ColumnNotFound(column.to_string()))?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let csv_record = result?;
        let text = csv_record.get(index).unwrap_or("").to_string();
        records.push(Record::new(row, text));
    }

    debug!("read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Write successfully annotated records to a CSV file, in input order.
///
/// Columns: the original text column, Sentiment, Category, Key Themes.
/// Failed records get no output row; they are reported through the
/// failure log instead. Returns the number of rows written.
pub fn write_annotations(path: &Path, column: &str, outcome: &BatchOutcome) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([column, "Sentiment", "Category", "Key Themes"])?;

    let mut written = 0;
    for (record, annotation) in outcome.annotated() {
        writer.write_record([
            record.text.as_str(),
            annotation.sentiment.as_str(),
            annotation.category.as_str(),
            annotation.key_themes.as_str(),
        ])?;
        written += 1;
    }

    writer.flush()?;
    debug!("wrote {} rows to {}", written, path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use remark_annotator::{Annotation, AnnotatorError, BatchMetadata, RecordOutcome};
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_read_records_by_column_name() {
        let file = csv_file("Id,Comment\n1,Great product\n2,Slow refund\n");
        let records = read_records(file.path(), "Comment").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new(0, "Great product"));
        assert_eq!(records[1], Record::new(1, "Slow refund"));
    }

    #[test]
    fn test_read_records_missing_column() {
        let file = csv_file("Id,Text\n1,hello\n");
        let result = read_records(file.path(), "Comment");
        assert!(matches!(result, Err(CliError::ColumnNotFound(_))));
    }

    #[test]
    fn test_read_records_keeps_empty_text_for_the_filter() {
        // Excluding blank rows is the pipeline filter's job, not ingestion's
        let file = csv_file("Id,Comment\n1,first\n2,\n3,third\n");
        let records = read_records(file.path(), "Comment").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].text, "");
    }

    #[test]
    fn test_write_annotations_in_order_skipping_failures() {
        let outcome = BatchOutcome {
            outcomes: vec![
                RecordOutcome {
                    record: Record::new(0, "Great product"),
                    result: Ok(Annotation {
                        sentiment: "Positive".to_string(),
                        category: "Product Quality".to_string(),
                        key_themes: "quality".to_string(),
                    }),
                },
                RecordOutcome {
                    record: Record::new(1, "Broken on arrival"),
                    result: Err(AnnotatorError::MalformedResponse("2 lines".to_string())),
                },
                RecordOutcome {
                    record: Record::new(2, "Fast shipping"),
                    result: Ok(Annotation {
                        sentiment: "Positive".to_string(),
                        category: "Delivery".to_string(),
                        key_themes: "fast delivery".to_string(),
                    }),
                },
            ],
            metadata: BatchMetadata {
                model_name: "test".to_string(),
                records_dropped: 0,
                records_attempted: 3,
                records_failed: 1,
                processing_time_ms: 0,
            },
        };

        let file = tempfile::NamedTempFile::new().unwrap();
        let written = write_annotations(file.path(), "Comment", &outcome).unwrap();
        assert_eq!(written, 2);

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Comment,Sentiment,Category,Key Themes");
        assert_eq!(lines[1], "Great product,Positive,Product Quality,quality");
        assert_eq!(lines[2], "Fast shipping,Positive,Delivery,fast delivery");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_round_trip_preserves_text_with_commas() {
        let outcome = BatchOutcome {
            outcomes: vec![RecordOutcome {
                record: Record::new(0, "Good, but slow"),
                result: Ok(Annotation {
                    sentiment: "Neutral".to_string(),
                    category: "Delivery".to_string(),
                    key_themes: "slow delivery".to_string(),
                }),
            }],
            metadata: BatchMetadata {
                model_name: "test".to_string(),
                records_dropped: 0,
                records_attempted: 1,
                records_failed: 0,
                processing_time_ms: 0,
            },
        };

        let file = tempfile::NamedTempFile::new().unwrap();
        write_annotations(file.path(), "Comment", &outcome).unwrap();

        let records = read_records(file.path(), "Comment").unwrap();
        assert_eq!(records[0].text, "Good, but slow");
    }
}
