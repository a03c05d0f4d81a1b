mod r#impl;
mod structs;
pub mod validators;

pub use r#impl::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use structs::*;
