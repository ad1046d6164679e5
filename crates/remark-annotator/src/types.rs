//! Record and annotation types

use crate::error::AnnotatorError;
use std::fmt;

/// One unit of input text to be annotated
///
/// `row` is the zero-based position of the record in its originating
/// table; it is the record's identifier throughout the pipeline. Records
/// are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Zero-based row position in the input table
    pub row: usize,

    /// The feedback text
    pub text: String,
}

impl Record {
    /// Create a new record
    pub fn new(row: usize, text: impl Into<String>) -> Self {
        Self {
            row,
            text: text.into(),
        }
    }
}

/// The structured output for one record
///
/// All three fields are populated when extraction succeeds; the pipeline
/// never emits a partially populated annotation. `key_themes` is the
/// comma-joined, lowercased normalization of the reply's themes line; an
/// empty themes list is represented as an empty string, not a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Sentiment value as extracted from the reply
    pub sentiment: String,

    /// Free-form short category label
    pub category: String,

    /// Normalized key themes, comma-joined and lowercased
    pub key_themes: String,
}

/// The closed set of expected sentiment values
///
/// The default pipeline accepts whatever string the parser extracts; this
/// enum backs the opt-in strict validation step, which matches the raw
/// value case-insensitively and canonicalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    /// Positive feedback
    Positive,
    /// Neither clearly positive nor negative
    Neutral,
    /// Negative feedback
    Negative,
}

impl Sentiment {
    /// Parse a raw sentiment value, case-insensitively
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    /// Canonical string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of annotating a single record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    /// The input record
    pub record: Record,

    /// The annotation, or the classified error that failed the record
    pub result: Result<Annotation, AnnotatorError>,
}

/// Result of annotating a batch
///
/// Outcomes are in filtered-input order; under the abort policy a batch
/// that fails returns an error instead, and no outcome is produced.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Per-record outcomes, in filtered-input order
    pub outcomes: Vec<RecordOutcome>,

    /// Metadata about the batch run
    pub metadata: BatchMetadata,
}

impl BatchOutcome {
    /// Iterate over successfully annotated records, in order
    pub fn annotated(&self) -> impl Iterator<Item = (&Record, &Annotation)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|a| (&o.record, a)))
    }

    /// Iterate over failed records, in order
    pub fn failures(&self) -> impl Iterator<Item = (&Record, &AnnotatorError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.record, e)))
    }
}

/// Metadata about a batch annotation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchMetadata {
    /// Name of the model used, for reporting
    pub model_name: String,

    /// Records dropped by the filter as blank
    pub records_dropped: usize,

    /// Records that reached the completion service
    pub records_attempted: usize,

    /// Records that failed with a classified error
    pub records_failed: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
