pub mod call;

pub use call::{QueuedCall, analyze_call, analyze_calls};
