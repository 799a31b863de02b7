pub mod read;

pub use read::{InputError, InputKind, read_interface, read_queue, read_rules};
