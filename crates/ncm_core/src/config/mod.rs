//! Configuration management.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use ncm_core::config::ConfigManager;
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/ncm-to-alac.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Input strategy: {}", config.settings().input.strategy);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ExtractionSettings, InputSettings, LoggingSettings, Settings, ToolSettings,
};
