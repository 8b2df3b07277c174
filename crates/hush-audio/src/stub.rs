//! Fallback backend for platforms without CoreAudio.

use crate::backend::{AudioBackend, AudioError, DeviceId, Result};

/// Backend that reports no devices at all.
///
/// Keeps the workspace buildable and the app runnable on non-macOS hosts,
/// where the utility degrades to doing nothing visible.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubBackend;

fn unsupported(device: DeviceId, control: &'static str) -> AudioError {
    AudioError::Unsupported { device, control }
}

impl AudioBackend for StubBackend {
    fn devices(&self) -> Result<Vec<DeviceId>> {
        Ok(Vec::new())
    }

    fn input_buffer_count(&self, _device: DeviceId) -> Result<u32> {
        Ok(0)
    }

    fn device_name(&self, device: DeviceId) -> Result<String> {
        Err(unsupported(device, "name"))
    }

    fn supports_mute(&self, _device: DeviceId) -> bool {
        false
    }

    fn mute_settable(&self, _device: DeviceId) -> bool {
        false
    }

    fn mute(&self, device: DeviceId) -> Result<bool> {
        Err(unsupported(device, "mute"))
    }

    fn set_mute(&self, device: DeviceId, _mute: bool) -> Result<()> {
        Err(unsupported(device, "mute"))
    }

    fn has_volume(&self, _device: DeviceId, _element: u32) -> bool {
        false
    }

    fn volume_settable(&self, _device: DeviceId, _element: u32) -> bool {
        false
    }

    fn volume(&self, device: DeviceId, _element: u32) -> Result<f32> {
        Err(unsupported(device, "volume"))
    }

    fn set_volume(&self, device: DeviceId, _element: u32, _volume: f32) -> Result<()> {
        Err(unsupported(device, "volume"))
    }
}
