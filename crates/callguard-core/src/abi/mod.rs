//! Interface description handling: selector derivation and lookup.

pub mod index;
pub mod selector;

pub use index::{FunctionDescriptor, Mutability, SelectorCollision, SelectorIndex};
pub use selector::{derive_selector, signature};
