use crate::TOOL_NAME;
use crate::report::model::Report;

/// Human-readable summary of a report.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, env!("CARGO_PKG_VERSION")));
    out.push_str(&format!("Calls analyzed: {}\n", report.items.len()));
    out.push_str(&format!("Average risk: {}\n", report.avg_risk));
    for (n, item) in report.items.iter().enumerate() {
        out.push_str(&format!(
            "  #{} {} -> {} risk={}\n",
            n, item.selector, item.target, item.risk
        ));
        for reason in &item.reasons {
            out.push_str(&format!("      - {}\n", reason));
        }
    }
    out
}
