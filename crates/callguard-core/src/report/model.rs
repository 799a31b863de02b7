use serde::{Deserialize, Serialize};

/// Risk assessment for one queued call.
///
/// `reasons` follows evaluation order, not risk magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub selector: String,
    pub target: String,
    pub risk: u32,
    pub reasons: Vec<String>,
}

/// Batch report. This is the program's only output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Mean risk over all items, always two fraction digits.
    pub avg_risk: String,
    pub items: Vec<AnalysisResult>,
}

impl Report {
    /// Items whose risk is strictly greater than `threshold`.
    pub fn above(&self, threshold: u32) -> impl Iterator<Item = &AnalysisResult> {
        self.items.iter().filter(move |i| i.risk > threshold)
    }
}
