//! Audit configuration.
//!
//! Holds the rule table and the fixed penalties applied outside of rule
//! evaluation. `Default` reproduces the built-in scoring.

use crate::rules::catalog::RuleSet;

/// Fixed contributions applied by the call analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalties {
    /// Selector not present in the interface description.
    pub unknown_selector: u32,
    /// Resolved function is declared `payable`.
    pub payable: u32,
    /// Call carries a non-zero native value.
    pub value_attached: u32,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            unknown_selector: 10,
            payable: 5,
            value_attached: 5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditConfig {
    pub rules: RuleSet,
    pub penalties: Penalties,
}

impl AuditConfig {
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }
}
