//! Application events for the tao event loop.

use crate::MicState;

/// Events for the tao event loop.
#[derive(Debug, Clone)]
pub enum HushEvent {
    /// The aggregate microphone state has changed
    StateChanged(MicState),
}
