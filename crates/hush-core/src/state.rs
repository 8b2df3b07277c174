//! Microphone state types.

/// The aggregate state of the system's input devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicState {
    /// Microphones are live and capturing
    Live,
    /// Microphones are muted
    Muted,
}

impl MicState {
    /// Build a state from the aggregate mute flag.
    pub fn from_muted(muted: bool) -> Self {
        if muted { MicState::Muted } else { MicState::Live }
    }

    pub fn is_muted(&self) -> bool {
        matches!(self, MicState::Muted)
    }

    /// The state after a toggle.
    pub fn toggled(&self) -> Self {
        match self {
            MicState::Live => MicState::Muted,
            MicState::Muted => MicState::Live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(MicState::Live.toggled(), MicState::Muted);
        assert_eq!(MicState::Live.toggled().toggled(), MicState::Live);
    }

    #[test]
    fn test_from_muted() {
        assert!(MicState::from_muted(true).is_muted());
        assert!(!MicState::from_muted(false).is_muted());
    }
}
