//! Configuration module for Go Dutch
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DutchPaths;
pub use settings::Settings;
