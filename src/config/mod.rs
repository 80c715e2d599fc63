//! Configuration module
//!
//! Settings are built from defaults, optionally a YAML file, then merged
//! with environment variables. Credentials enter the process here and are
//! handed to provider adapters as plain values.

mod settings;

pub use settings::{Credentials, OutgoingSettings, SearchSettings, Settings};
