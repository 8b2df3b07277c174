//! The seam between the mute strategy and the OS audio property API.

use thiserror::Error;

/// Opaque identifier for an audio device, as assigned by the OS.
pub type DeviceId = u32;

/// The master ("main") element, the first-choice target for mute and volume
/// property access.
pub const MASTER_ELEMENT: u32 = 0;

/// Numbered channel elements tried when the master element is absent or not
/// settable.
pub const CHANNEL_ELEMENTS: [u32; 2] = [1, 2];

#[derive(Debug, Error)]
pub enum AudioError {
    /// An OS property call returned a failure status.
    #[error("{what} failed with status {status}")]
    Os { status: i32, what: &'static str },
    /// The device does not expose the requested control.
    #[error("device {device} has no {control} control")]
    Unsupported {
        device: DeviceId,
        control: &'static str,
    },
    /// The control exists but rejects writes.
    #[error("{control} control on device {device} is not settable")]
    NotSettable {
        device: DeviceId,
        control: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, AudioError>;

/// Access to the OS audio-object property API.
///
/// [`crate::device`] is generic over this trait so the fallback strategy can
/// be exercised against a fake backend in tests. The real implementation on
/// macOS is [`crate::CoreAudioBackend`].
pub trait AudioBackend {
    /// Every audio device known to the system, input or not.
    fn devices(&self) -> Result<Vec<DeviceId>>;

    /// Number of input-direction buffers in the device's stream
    /// configuration. Zero means the device captures nothing.
    fn input_buffer_count(&self, device: DeviceId) -> Result<u32>;

    /// Human-readable device name.
    fn device_name(&self, device: DeviceId) -> Result<String>;

    /// Whether the device exposes a hardware mute control.
    fn supports_mute(&self, device: DeviceId) -> bool;

    /// Whether the hardware mute control accepts writes.
    fn mute_settable(&self, device: DeviceId) -> bool;

    /// Read the hardware mute control.
    fn mute(&self, device: DeviceId) -> Result<bool>;

    /// Write the hardware mute control.
    fn set_mute(&self, device: DeviceId, mute: bool) -> Result<()>;

    /// Whether the device exposes a volume control on the given element.
    fn has_volume(&self, device: DeviceId, element: u32) -> bool;

    /// Whether the volume control on the given element accepts writes.
    fn volume_settable(&self, device: DeviceId, element: u32) -> bool;

    /// Read the volume scalar (0.0..=1.0) on the given element.
    fn volume(&self, device: DeviceId, element: u32) -> Result<f32>;

    /// Write the volume scalar on the given element.
    fn set_volume(&self, device: DeviceId, element: u32, volume: f32) -> Result<()>;
}
