pub mod abi;
pub mod analyze;
pub mod config;
pub mod input;
pub mod report;
pub mod rules;

use std::path::Path;

use serde_json::Value;

use crate::abi::SelectorIndex;
use crate::analyze::{QueuedCall, analyze_calls};
use crate::config::AuditConfig;
use crate::input::InputError;
use crate::report::aggregate::aggregate;
use crate::report::model::Report;

pub const TOOL_NAME: &str = "callguard";

/// Audit already-parsed inputs.
///
/// Builds the selector index from `abi`, scores each call in order, and
/// aggregates the batch. This step cannot fail.
pub fn audit(abi: &[Value], calls: &[QueuedCall], config: &AuditConfig) -> Report {
    let index = SelectorIndex::from_abi(abi);
    tracing::debug!(
        functions = index.len(),
        collisions = index.collisions().len(),
        rules = config.rules.len(),
        "selector index built"
    );

    aggregate(analyze_calls(&index, calls, config))
}

/// Load both input documents and audit them.
///
/// Both files are read before any analysis, so an input error never
/// yields a partial report.
pub fn audit_files(
    abi_path: &Path,
    queue_path: &Path,
    config: &AuditConfig,
) -> Result<Report, InputError> {
    let abi = input::read_interface(abi_path)?;
    let calls = input::read_queue(queue_path)?;
    Ok(audit(&abi, &calls, config))
}
