//! Configuration module
//!
//! User preferences for the highlighting and preview core, with
//! serialization to/from JSON and persistent storage in platform-specific
//! directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
