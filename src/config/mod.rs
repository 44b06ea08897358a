//! Configuration module for album-backup.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig, DEFAULT_API_BASE};
pub use validation::validate_config;
