//! Function selector derivation.
//!
//! A selector is the first four bytes of the Keccak-256 digest of a
//! function's canonical signature, e.g. `transfer(address,uint256)`.
//! It is rendered as a lowercase, `0x`-prefixed, 8-hex-digit string so it
//! can be compared directly against the leading characters of call data.

use tiny_keccak::{Hasher, Keccak};

/// Length of a rendered selector: `0x` plus 8 hex digits.
pub const SELECTOR_LEN: usize = 10;

/// Compute the Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// Build a canonical signature string: `name(type1,type2,...)`.
///
/// Types are joined in declaration order with no whitespace.
pub fn signature<S: AsRef<str>>(name: &str, parameter_types: &[S]) -> String {
    let params: Vec<&str> = parameter_types.iter().map(|t| t.as_ref()).collect();
    format!("{}({})", name, params.join(","))
}

/// Derive the 4-byte selector for a canonical signature string.
///
/// Pure and deterministic: identical input always yields identical output.
pub fn derive_selector(signature: &str) -> String {
    let digest = keccak256(signature.as_bytes());
    format!("0x{}", hex::encode(&digest[..4]))
}

/// Extract the selector portion of hex call data.
///
/// Takes the first [`SELECTOR_LEN`] characters. Short data yields a short
/// string that will never match an index key.
pub fn selector_of(data: &str) -> String {
    data.chars().take(SELECTOR_LEN).collect()
}
