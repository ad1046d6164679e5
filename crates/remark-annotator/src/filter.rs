//! Record filtering ahead of annotation

use crate::types::Record;
use tracing::debug;

/// Drop records whose text is empty after trimming
///
/// Pure filter with no error path: malformed records are excluded, not
/// reported. Relative order of the survivors is preserved, and everything
/// downstream may assume non-blank text.
pub fn filter_records(records: Vec<Record>) -> Vec<Record> {
    let total = records.len();
    let kept: Vec<Record> = records
        .into_iter()
        .filter(|record| !record.text.trim().is_empty())
        .collect();

    if kept.len() < total {
        debug!("filtered out {} blank records of {}", total - kept.len(), total);
    }

    kept
}
