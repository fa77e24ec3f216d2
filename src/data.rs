use serde::{Deserialize, Serialize};

/// A captured HTTP response, the unit of persistence and comparison.
/// Serialized to souvenir files as `{"statusCode": ..., "body": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub status_code: u16,
    pub body: String,
}

/// Aggregate counts for one snapshot or replay run.
///
/// `failed` holds timeouts, transport errors and (for snapshot) 5xx
/// responses or (for replay) comparison mismatches; `bad` holds 4xx
/// responses and is only populated by snapshot runs.
#[derive(Debug, Default, Clone)]
pub struct RunResult {
    pub total: usize,
    pub skipped: usize,
    pub failed: Vec<usize>,
    pub bad: Vec<usize>,
}

impl RunResult {
    pub fn successful(&self) -> usize {
        self.total - self.skipped - self.failed.len() - self.bad.len()
    }
}

/// Renders an index list for the summary, e.g. `2,5,7`.
pub fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
