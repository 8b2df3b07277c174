// Re-export from sub-crates
pub use hush_audio::{AudioBackend, InputDevice, MuteController, SystemBackend};
pub use hush_core::{
    Config, ConfigManager, MicState, APP_NAME, APP_NAME_PRETTY, DEFAULT_LOG_LEVEL,
};

// App-specific modules
pub mod config_ext;
pub mod event;
pub mod icon;
pub mod notify;

// Version from this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
