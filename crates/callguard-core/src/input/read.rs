//! Loading of the audit inputs.
//!
//! Every document is read and parsed up front. Any failure here is fatal and
//! names the input that failed, so no partial report can be produced.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::analyze::call::QueuedCall;
use crate::rules::catalog::{Rule, RuleSet, RuleSetError};

/// Which input document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Interface,
    Queue,
    Rules,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Interface => "interface description",
            InputKind::Queue => "call queue",
            InputKind::Rules => "rule set",
        })
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {kind}: {}", .path.display())]
    Read {
        kind: InputKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind}: {}", .path.display())]
    Parse {
        kind: InputKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {kind}: {}: expected {expected}", .path.display())]
    Shape {
        kind: InputKind,
        path: PathBuf,
        expected: &'static str,
    },

    #[error("invalid {kind}: {}", .path.display())]
    Rules {
        kind: InputKind,
        path: PathBuf,
        #[source]
        source: RuleSetError,
    },
}

impl InputError {
    pub fn kind(&self) -> InputKind {
        match self {
            InputError::Read { kind, .. }
            | InputError::Parse { kind, .. }
            | InputError::Shape { kind, .. }
            | InputError::Rules { kind, .. } => *kind,
        }
    }
}

fn read_bytes(kind: InputKind, path: &Path) -> Result<Vec<u8>, InputError> {
    fs::read(path).map_err(|source| InputError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(
    kind: InputKind,
    path: &Path,
    bytes: &[u8],
) -> Result<T, InputError> {
    serde_json::from_slice(bytes).map_err(|source| InputError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Read an interface description.
///
/// Accepts a bare JSON array of entries or an artifact object carrying the
/// array under `"abi"`. Entries are returned raw; per-entry validation is
/// lenient and happens when the selector index is built.
pub fn read_interface(path: &Path) -> Result<Vec<Value>, InputError> {
    let kind = InputKind::Interface;
    let bytes = read_bytes(kind, path)?;

    match parse::<Value>(kind, path, &bytes)? {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut obj) => match obj.remove("abi") {
            Some(Value::Array(entries)) => Ok(entries),
            _ => Err(InputError::Shape {
                kind,
                path: path.to_path_buf(),
                expected: "an array of entries or an object with an \"abi\" array",
            }),
        },
        _ => Err(InputError::Shape {
            kind,
            path: path.to_path_buf(),
            expected: "an array of entries or an object with an \"abi\" array",
        }),
    }
}

/// Read the queue of pending calls, in queue order.
pub fn read_queue(path: &Path) -> Result<Vec<QueuedCall>, InputError> {
    let kind = InputKind::Queue;
    let bytes = read_bytes(kind, path)?;
    parse(kind, path, &bytes)
}

/// Read a replacement rule table. Rule ids must be unique.
pub fn read_rules(path: &Path) -> Result<RuleSet, InputError> {
    let kind = InputKind::Rules;
    let bytes = read_bytes(kind, path)?;
    let rules: Vec<Rule> = parse(kind, path, &bytes)?;

    RuleSet::new(rules).map_err(|source| InputError::Rules {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
