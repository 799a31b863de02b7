//! Selector index over a contract interface description.
//!
//! The index maps each derived selector to exactly one [`FunctionDescriptor`].
//! Building is total: non-function entries are skipped, missing optional
//! fields are defaulted, and malformed entries are dropped with a debug log.
//!
//! Two distinct signatures can hash to the same 4-byte selector. The index
//! keeps the later declaration and records the overwrite as a
//! [`SelectorCollision`] so callers can surface it.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::abi::selector::{derive_selector, signature};

/// Declared interaction class of a function with persistent state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    Pure,
    View,
    #[default]
    NonPayable,
    Payable,
}

impl Mutability {
    /// Parse an ABI `stateMutability` value. Unknown values fall back to
    /// `nonpayable`.
    pub fn from_abi(value: Option<&str>) -> Self {
        match value {
            Some("pure") => Mutability::Pure,
            Some("view") => Mutability::View,
            Some("payable") => Mutability::Payable,
            _ => Mutability::NonPayable,
        }
    }
}

/// Decoded metadata for one interface function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub parameter_types: Vec<String>,
    pub mutability: Mutability,
}

impl FunctionDescriptor {
    /// Canonical `name(type,...)` signature.
    pub fn signature(&self) -> String {
        signature(&self.name, &self.parameter_types)
    }

    pub fn is_payable(&self) -> bool {
        self.mutability == Mutability::Payable
    }
}

/// Raw interface entry as it appears in a JSON ABI. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Vec<AbiParam>,
    pub state_mutability: Option<String>,
}

/// One declared parameter. Only the type contributes to the selector.
#[derive(Debug, Clone, Deserialize)]
pub struct AbiParam {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<AbiParam>,
}

/// Treat an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AbiParam {
    /// Canonical type string. Tuples expand to their component types,
    /// keeping any array suffix: `tuple[]` with `(address,uint256)` becomes
    /// `(address,uint256)[]`.
    pub fn canonical_type(&self) -> String {
        match self.kind.strip_prefix("tuple") {
            Some(suffix) => {
                let inner: Vec<String> = self
                    .components
                    .iter()
                    .map(AbiParam::canonical_type)
                    .collect();
                format!("({}){}", inner.join(","), suffix)
            }
            None => self.kind.clone(),
        }
    }
}

impl AbiEntry {
    /// Convert into a descriptor if this entry is a named function.
    pub fn into_descriptor(self) -> Option<FunctionDescriptor> {
        if self.kind.as_deref() != Some("function") {
            return None;
        }
        let name = self.name?;
        Some(FunctionDescriptor {
            name,
            parameter_types: self.inputs.iter().map(AbiParam::canonical_type).collect(),
            mutability: Mutability::from_abi(self.state_mutability.as_deref()),
        })
    }
}

/// An index overwrite caused by two entries sharing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorCollision {
    pub selector: String,
    /// Signature of the entry that was dropped.
    pub replaced: String,
    /// Signature of the entry that now owns the selector.
    pub replacement: String,
}

/// Selector → descriptor lookup for one interface description.
#[derive(Debug, Clone, Default)]
pub struct SelectorIndex {
    entries: HashMap<String, FunctionDescriptor>,
    collisions: Vec<SelectorCollision>,
}

impl SelectorIndex {
    /// Build an index from already-decoded descriptors, in declaration order.
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = FunctionDescriptor>,
    {
        let mut index = SelectorIndex::default();
        for descriptor in descriptors {
            index.insert(descriptor);
        }
        index
    }

    /// Build an index from raw JSON ABI entries.
    ///
    /// Each entry is decoded independently so a single malformed entry
    /// cannot reject the document.
    pub fn from_abi(entries: &[Value]) -> Self {
        let descriptors = entries.iter().enumerate().filter_map(|(pos, raw)| {
            match AbiEntry::deserialize(raw) {
                Ok(entry) => entry.into_descriptor(),
                Err(err) => {
                    tracing::debug!(position = pos, error = %err, "skipping malformed ABI entry");
                    None
                }
            }
        });
        Self::from_descriptors(descriptors)
    }

    fn insert(&mut self, descriptor: FunctionDescriptor) {
        let sig = descriptor.signature();
        let selector = derive_selector(&sig);

        if let Some(previous) = self.entries.insert(selector.clone(), descriptor) {
            tracing::warn!(
                selector = %selector,
                replaced = %previous.signature(),
                replacement = %sig,
                "selector collision; later declaration wins"
            );
            self.collisions.push(SelectorCollision {
                selector,
                replaced: previous.signature(),
                replacement: sig,
            });
        }
    }

    pub fn get(&self, selector: &str) -> Option<&FunctionDescriptor> {
        self.entries.get(selector)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.entries.contains_key(selector)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Overwrites observed while building, in declaration order.
    pub fn collisions(&self) -> &[SelectorCollision] {
        &self.collisions
    }
}
