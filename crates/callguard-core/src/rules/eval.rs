use crate::rules::catalog::{RuleId, RuleSet};

/// A rule whose pattern matched a function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggeredRule {
    pub rule_id: RuleId,
    pub weight: u32,
    pub reason: String,
}

/// Evaluates every rule in `rules` against `function_name`.
///
/// The name is lowercased once; rules never see parameter types or
/// addresses. All rules are checked and matches are returned in catalog
/// order, so several rules can fire for one name.
pub fn evaluate(rules: &RuleSet, function_name: &str) -> Vec<TriggeredRule> {
    let lowered = function_name.to_lowercase();

    rules
        .rules()
        .iter()
        .filter(|rule| rule.pattern.matches(&lowered))
        .map(|rule| TriggeredRule {
            rule_id: rule.id.clone(),
            weight: rule.weight,
            reason: rule.description.clone(),
        })
        .collect()
}
