//! Run configuration.
//!
//! Built once at startup and passed by reference into every component.
//! Only the binary reads the process environment.

mod config_model;

pub use config_model::{Config, EnvironmentConfig, EnvironmentRole};
