//! Rule catalog for call auditing.
//!
//! A rule is a weighted, tagged predicate over a lowercased function name.
//! The catalog is an ordered list; order determines the order reasons
//! appear in a result. The default table lives here as data so callers
//! (and tests) can swap in their own set without touching the engine.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Stable rule identifier, e.g. `"mint"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        RuleId(s.to_string())
    }
}

/// Case-insensitive name predicate.
///
/// Serialized externally tagged in snake case, e.g.
/// `{"all_of": [{"contains": "upgrade"}, {"contains": "proxy"}]}`.
/// `Contains` needles are stored lowercase; build them with
/// [`NamePattern::contains`] or deserialize them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NamePattern {
    #[serde(deserialize_with = "lowercase")]
    Contains(String),
    AnyOf(Vec<NamePattern>),
    AllOf(Vec<NamePattern>),
}

impl NamePattern {
    pub fn contains(needle: &str) -> Self {
        NamePattern::Contains(needle.to_lowercase())
    }

    pub fn any_of<I: IntoIterator<Item = NamePattern>>(patterns: I) -> Self {
        NamePattern::AnyOf(patterns.into_iter().collect())
    }

    pub fn all_of<I: IntoIterator<Item = NamePattern>>(patterns: I) -> Self {
        NamePattern::AllOf(patterns.into_iter().collect())
    }

    /// Test against an already-lowercased name.
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            NamePattern::Contains(needle) => lowered.contains(needle.as_str()),
            NamePattern::AnyOf(ps) => ps.iter().any(|p| p.matches(lowered)),
            NamePattern::AllOf(ps) => ps.iter().all(|p| p.matches(lowered)),
        }
    }
}

fn lowercase<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.to_lowercase())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub id: RuleId,
    pub pattern: NamePattern,
    pub weight: u32,
    /// Reason text appended when the rule matches.
    pub description: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("duplicate rule id: {0}")]
    DuplicateId(RuleId),
}

/// Ordered collection of rules with unique ids.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleSetError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(&rule.id) {
                return Err(RuleSetError::DuplicateId(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        default_rules()
    }
}

/// Built-in rule table. Weights are part of the scoring contract.
pub fn default_rules() -> RuleSet {
    use NamePattern as P;

    let rule = |id: &str, pattern: NamePattern, weight: u32, description: &str| Rule {
        id: id.into(),
        pattern,
        weight,
        description: description.to_string(),
    };

    RuleSet {
        rules: vec![
            rule(
                "delegatecall",
                P::contains("delegatecall"),
                40,
                "Delegatecall capability",
            ),
            rule(
                "upgrade-proxy",
                P::all_of([
                    P::contains("upgrade"),
                    P::any_of([P::contains("implementation"), P::contains("proxy")]),
                ]),
                25,
                "Proxy implementation upgrade",
            ),
            rule(
                "role-admin",
                P::all_of([
                    P::any_of([P::contains("grant"), P::contains("revoke")]),
                    P::contains("role"),
                ]),
                15,
                "Role administration change",
            ),
            rule(
                "pause",
                P::any_of([P::contains("pause"), P::contains("unpause")]),
                10,
                "Pause control",
            ),
            rule("mint", P::contains("mint"), 20, "Token minting"),
        ],
    }
}
