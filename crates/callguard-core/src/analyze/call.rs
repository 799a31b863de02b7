//! Per-call risk analysis.
//!
//! Resolves a queued call's selector against the interface index, runs the
//! rule engine on the resolved name, and folds in the universal checks
//! (payability, attached value). Analysis never fails: an unknown selector
//! is a scored condition, not an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::abi::index::SelectorIndex;
use crate::abi::selector::selector_of;
use crate::config::AuditConfig;
use crate::report::model::AnalysisResult;
use crate::rules::eval::evaluate;

pub const REASON_UNKNOWN_SELECTOR: &str = "Unknown selector (not in ABI)";
pub const REASON_PAYABLE: &str = "Payable function";
pub const REASON_VALUE_ATTACHED: &str = "ETH value attached";

/// One pending call from the queue. Read-only input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueuedCall {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub data: String,
    /// Native value as a JSON number or numeric string. Absent means zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl QueuedCall {
    pub fn selector(&self) -> String {
        selector_of(&self.data)
    }

    /// Whether the attached value coerces to a number greater than zero.
    pub fn has_value(&self) -> bool {
        self.value.as_ref().is_some_and(value_is_positive)
    }
}

/// Numeric coercion of a call value. Anything unparsable counts as zero.
fn value_is_positive(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(|v| v > 0.0),
        Value::String(s) => {
            let s = s.trim();
            if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                !digits.is_empty()
                    && digits.chars().all(|c| c.is_ascii_hexdigit())
                    && digits.chars().any(|c| c != '0')
            } else {
                s.parse::<f64>().is_ok_and(|v| v > 0.0)
            }
        }
        _ => false,
    }
}

/// Running total of contributions, kept in application order.
#[derive(Debug, Default)]
struct Score {
    risk: u32,
    reasons: Vec<String>,
}

impl Score {
    fn add(&mut self, weight: u32, reason: impl Into<String>) {
        self.risk = self.risk.saturating_add(weight);
        self.reasons.push(reason.into());
    }
}

/// Analyze a single call against `index`.
///
/// Reason order: unknown-selector or rule matches (catalog order) followed
/// by payability, then attached value.
pub fn analyze_call(
    index: &SelectorIndex,
    call: &QueuedCall,
    config: &AuditConfig,
) -> AnalysisResult {
    let selector = call.selector();
    let penalties = &config.penalties;
    let mut score = Score::default();

    match index.get(&selector) {
        None => {
            tracing::debug!(selector = %selector, target = %call.to, "selector not in interface");
            score.add(penalties.unknown_selector, REASON_UNKNOWN_SELECTOR);
        }
        Some(function) => {
            for hit in evaluate(&config.rules, &function.name) {
                score.add(hit.weight, hit.reason);
            }
            if function.is_payable() {
                score.add(penalties.payable, REASON_PAYABLE);
            }
        }
    }

    if call.has_value() {
        score.add(penalties.value_attached, REASON_VALUE_ATTACHED);
    }

    AnalysisResult {
        selector,
        target: call.to.clone(),
        risk: score.risk,
        reasons: score.reasons,
    }
}

/// Analyze every call in queue order.
pub fn analyze_calls(
    index: &SelectorIndex,
    calls: &[QueuedCall],
    config: &AuditConfig,
) -> Vec<AnalysisResult> {
    calls
        .iter()
        .map(|call| analyze_call(index, call, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::index::{FunctionDescriptor, Mutability};
    use crate::abi::selector::derive_selector;
    use crate::config::Penalties;
    use crate::rules::catalog::RuleSet;
    use serde_json::json;

    const TARGET: &str = "0x000000000000000000000000000000000000dead";

    fn func(name: &str, params: &[&str], mutability: Mutability) -> FunctionDescriptor {
        FunctionDescriptor {
            name: name.into(),
            parameter_types: params.iter().map(|p| p.to_string()).collect(),
            mutability,
        }
    }

    fn index() -> SelectorIndex {
        SelectorIndex::from_descriptors([
            func("mint", &["address", "uint256"], Mutability::NonPayable),
            func("grantRole", &["bytes32", "address"], Mutability::Payable),
            func("transfer", &["address", "uint256"], Mutability::NonPayable),
            func("deposit", &[], Mutability::Payable),
        ])
    }

    fn call(signature: &str, value: Option<Value>) -> QueuedCall {
        QueuedCall {
            to: TARGET.into(),
            data: format!("{}{}", derive_selector(signature), "00".repeat(64)),
            value,
        }
    }

    fn run(call: &QueuedCall) -> AnalysisResult {
        analyze_call(&index(), call, &AuditConfig::default())
    }

    #[test]
    fn mint_without_value_scores_rule_only() {
        let r = run(&call("mint(address,uint256)", Some(json!(0))));
        assert_eq!(r.selector, "0x40c10f19");
        assert_eq!(r.target, TARGET);
        assert_eq!(r.risk, 20);
        assert_eq!(r.reasons, vec!["Token minting"]);
    }

    #[test]
    fn mint_with_value_adds_value_penalty_last() {
        let r = run(&call("mint(address,uint256)", Some(json!(1))));
        assert_eq!(r.risk, 25);
        assert_eq!(r.reasons, vec!["Token minting", "ETH value attached"]);
    }

    #[test]
    fn payable_role_grant_adds_payability_after_rules() {
        let r = run(&call("grantRole(bytes32,address)", Some(json!(0))));
        assert_eq!(r.risk, 20);
        assert_eq!(r.reasons, vec!["Role administration change", REASON_PAYABLE]);
    }

    #[test]
    fn unknown_selector_skips_rules() {
        let c = QueuedCall {
            to: TARGET.into(),
            data: "0xdeadbeef".into(),
            value: None,
        };
        let r = run(&c);
        assert_eq!(r.selector, "0xdeadbeef");
        assert_eq!(r.risk, 10);
        assert_eq!(r.reasons, vec![REASON_UNKNOWN_SELECTOR]);
    }

    #[test]
    fn unknown_selector_with_value_still_flags_value() {
        let c = QueuedCall {
            to: TARGET.into(),
            data: "0x12345678".into(),
            value: Some(json!("1000")),
        };
        let r = run(&c);
        assert_eq!(r.risk, 15);
        assert_eq!(r.reasons, vec![REASON_UNKNOWN_SELECTOR, REASON_VALUE_ATTACHED]);
    }

    #[test]
    fn short_data_is_unknown_not_an_error() {
        for data in ["", "0x", "0x40c1"] {
            let c = QueuedCall {
                to: TARGET.into(),
                data: data.into(),
                value: None,
            };
            let r = run(&c);
            assert_eq!(r.selector, data);
            assert_eq!(r.reasons, vec![REASON_UNKNOWN_SELECTOR]);
        }
    }

    #[test]
    fn benign_resolved_call_scores_zero() {
        let r = run(&call("transfer(address,uint256)", None));
        assert_eq!(r.risk, 0);
        assert!(r.reasons.is_empty());
    }

    #[test]
    fn payable_with_value_orders_payable_before_value() {
        let r = run(&call("deposit()", Some(json!("0x2386f26fc10000"))));
        assert_eq!(r.risk, 10);
        assert_eq!(r.reasons, vec![REASON_PAYABLE, REASON_VALUE_ATTACHED]);
    }

    #[test]
    fn value_coercion() {
        let positive = [
            json!(1),
            json!(0.5),
            json!("1"),
            json!(" 42 "),
            json!("0x01"),
            json!("1e18"),
            json!("1e400"),
            json!("Infinity"),
        ];
        for v in positive {
            assert!(call("x()", Some(v.clone())).has_value(), "{v} should be positive");
        }

        let zero = [
            json!(0),
            json!(-3),
            json!("0"),
            json!(""),
            json!("0x"),
            json!("0x000"),
            json!("abc"),
            json!("NaN"),
            json!("-Infinity"),
            json!("0xzz"),
            json!(null),
            json!(true),
            json!([1]),
        ];
        for v in zero {
            assert!(!call("x()", Some(v.clone())).has_value(), "{v} should be zero");
        }

        assert!(!call("x()", None).has_value());
    }

    #[test]
    fn overflowing_value_still_flags_attached_value() {
        let r = run(&call("mint(address,uint256)", Some(json!("1e400"))));
        assert_eq!(r.risk, 25);
        assert_eq!(r.reasons, vec!["Token minting", REASON_VALUE_ATTACHED]);
    }

    #[test]
    fn missing_value_deserializes_as_none() {
        let c: QueuedCall = serde_json::from_value(json!({"to": TARGET, "data": "0x8456cb59"})).unwrap();
        assert!(c.value.is_none());
        assert_eq!(c.selector(), "0x8456cb59");
    }

    #[test]
    fn penalties_come_from_config() {
        let config = AuditConfig {
            rules: RuleSet::empty(),
            penalties: Penalties {
                unknown_selector: 3,
                payable: 7,
                value_attached: 11,
            },
        };
        let r = analyze_call(&index(), &call("deposit()", Some(json!(1))), &config);
        assert_eq!(r.risk, 18);

        let unknown = QueuedCall {
            data: "0xffffffff".into(),
            ..Default::default()
        };
        assert_eq!(analyze_call(&index(), &unknown, &config).risk, 3);
    }

    #[test]
    fn analyze_calls_preserves_queue_order() {
        let calls = vec![
            call("transfer(address,uint256)", None),
            call("mint(address,uint256)", None),
            call("grantRole(bytes32,address)", None),
        ];
        let risks: Vec<u32> = analyze_calls(&index(), &calls, &AuditConfig::default())
            .iter()
            .map(|r| r.risk)
            .collect();
        assert_eq!(risks, vec![0, 20, 20]);
    }
}
