//! App-specific configuration extensions.
//!
//! This module provides hotkey support on top of the core Config.

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use tracing::warn;

use crate::Config;

/// Default hotkey: Cmd+Shift+M
pub fn default_hotkey() -> HotKey {
    HotKey::new(Some(Modifiers::META | Modifiers::SHIFT), Code::KeyM)
}

/// Extension trait for Config to handle hotkeys.
pub trait ConfigExt {
    /// Get the hotkey, parsing from config or using the default.
    fn hotkey(&self) -> HotKey;
}

impl ConfigExt for Config {
    fn hotkey(&self) -> HotKey {
        let Some(raw) = self.hotkey_str() else {
            return default_hotkey();
        };

        match raw.parse() {
            Ok(hotkey) => hotkey,
            Err(err) => {
                warn!("Invalid hotkey {raw:?} in config, using default: {err}");
                default_hotkey()
            }
        }
    }
}

/// Short display label for a hotkey, e.g. "⌘⇧M".
pub fn hotkey_label(hotkey: &HotKey) -> String {
    let mut label = String::new();
    for (modifier, symbol) in [
        (Modifiers::CONTROL, "⌃"),
        (Modifiers::ALT, "⌥"),
        (Modifiers::SHIFT, "⇧"),
        (Modifiers::META, "⌘"),
    ] {
        if hotkey.mods.contains(modifier) {
            label.push_str(symbol);
        }
    }

    let key = format!("{:?}", hotkey.key);
    let key = key.strip_prefix("Key").unwrap_or(&key);
    let key = key.strip_prefix("Digit").unwrap_or(key);
    label.push_str(key);
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hotkey_uses_default() {
        let config = Config::default();
        assert_eq!(config.hotkey(), default_hotkey());
    }

    #[test]
    fn test_hotkey_parsed_from_config() {
        let config = Config {
            hotkey: Some("alt+shift+KeyU".to_string()),
        };
        assert_eq!(
            config.hotkey(),
            HotKey::new(Some(Modifiers::ALT | Modifiers::SHIFT), Code::KeyU)
        );
    }

    #[test]
    fn test_invalid_hotkey_falls_back_to_default() {
        let config = Config {
            hotkey: Some("not-a-hotkey".to_string()),
        };
        assert_eq!(config.hotkey(), default_hotkey());
    }

    #[test]
    fn test_hotkey_label() {
        assert_eq!(hotkey_label(&default_hotkey()), "⇧⌘M");
        assert_eq!(
            hotkey_label(&HotKey::new(Some(Modifiers::CONTROL), Code::Digit2)),
            "⌃2"
        );
    }
}
