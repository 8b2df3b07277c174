//! Input-device mute control for hush.
//!
//! The strategy lives in [`device`] and is generic over the [`AudioBackend`]
//! trait: hardware mute is preferred where a device exposes one, with a
//! volume-scalar fallback (0.0 to mute, 1.0 to unmute) everywhere else.
//! [`MuteController`] applies that strategy across every detected input
//! device and tracks the aggregate state.

mod backend;
mod controller;
pub mod device;

#[cfg(target_os = "macos")]
mod coreaudio;
#[cfg(not(target_os = "macos"))]
mod stub;

pub use backend::{AudioBackend, AudioError, DeviceId, CHANNEL_ELEMENTS, MASTER_ELEMENT};
pub use controller::{InputDevice, MuteController};

#[cfg(target_os = "macos")]
pub use coreaudio::CoreAudioBackend;
#[cfg(not(target_os = "macos"))]
pub use stub::StubBackend;

/// The property backend for the platform this binary was built for.
#[cfg(target_os = "macos")]
pub type SystemBackend = CoreAudioBackend;
#[cfg(not(target_os = "macos"))]
pub type SystemBackend = StubBackend;
