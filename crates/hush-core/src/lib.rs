//! Core types and configuration for hush.
//!
//! This crate provides platform-agnostic types that can be used across
//! all hush sub-crates.

mod config;
mod state;

pub use config::{Config, ConfigManager};
pub use state::MicState;

/// Application name
pub const APP_NAME: &str = "hush";

/// Pretty application name for display
pub const APP_NAME_PRETTY: &str = "Hush";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
