//! Batch aggregation of per-call results.

use crate::report::model::{AnalysisResult, Report};

/// Fold per-call results into a [`Report`].
///
/// Items keep their input order; nothing is filtered or sorted.
pub fn aggregate(items: Vec<AnalysisResult>) -> Report {
    let total: u64 = items.iter().map(|i| u64::from(i.risk)).sum();
    let avg_risk = format_mean(total, items.len() as u64);

    tracing::info!(calls = items.len(), avg_risk = %avg_risk, "aggregated audit report");

    Report { avg_risk, items }
}

/// Render `total / count` with exactly two fraction digits.
///
/// Integer arithmetic keeps the result exact; halves round up.
/// A zero count renders as `"0.00"`.
pub fn format_mean(total: u64, count: u64) -> String {
    if count == 0 {
        return "0.00".to_string();
    }
    let total = u128::from(total);
    let count = u128::from(count);
    let hundredths = (total * 200 + count) / (count * 2);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}
