//! Per-device mute and volume strategy.
//!
//! Every function degrades rather than fails: enumeration errors produce an
//! empty list, missing controls fall through to the next mechanism, and
//! unreadable volumes are assumed to be 1.0. Diagnostics go to `tracing`.

use tracing::{debug, warn};

use crate::backend::{AudioBackend, DeviceId, CHANNEL_ELEMENTS, MASTER_ELEMENT};

/// Name reported for devices whose name property cannot be read.
pub const FALLBACK_DEVICE_NAME: &str = "Unknown Device";

/// All devices exposing at least one input-direction buffer.
pub fn input_devices<B: AudioBackend>(backend: &B) -> Vec<DeviceId> {
    let devices = match backend.devices() {
        Ok(devices) => devices,
        Err(err) => {
            warn!("failed to enumerate audio devices: {err}");
            return Vec::new();
        }
    };

    devices
        .into_iter()
        .filter(|&device| {
            backend
                .input_buffer_count(device)
                .map(|buffers| buffers > 0)
                .unwrap_or(false)
        })
        .collect()
}

/// Human-readable device name, with a fixed fallback when the query fails.
pub fn display_name<B: AudioBackend>(backend: &B, device: DeviceId) -> String {
    backend
        .device_name(device)
        .unwrap_or_else(|_| FALLBACK_DEVICE_NAME.to_string())
}

/// Whether a device is muted.
///
/// Prefers the hardware mute control; devices without one (or whose control
/// fails to read) count as muted when their input volume is zero.
pub fn is_muted<B: AudioBackend>(backend: &B, device: DeviceId) -> bool {
    if backend.supports_mute(device) {
        match backend.mute(device) {
            Ok(muted) => return muted,
            Err(err) => debug!(device, "hardware mute read failed, checking volume: {err}"),
        }
    }

    volume(backend, device) == 0.0
}

/// Mute or unmute a device.
///
/// Writes the hardware mute control when it exists and is settable. Otherwise
/// the volume scalar stands in: 0.0 for mute, 1.0 for unmute.
pub fn set_muted<B: AudioBackend>(backend: &B, device: DeviceId, mute: bool) {
    if backend.supports_mute(device) && backend.mute_settable(device) {
        match backend.set_mute(device, mute) {
            Ok(()) => return,
            Err(err) => debug!(device, "hardware mute write failed, using volume: {err}"),
        }
    }

    set_volume(backend, device, if mute { 0.0 } else { 1.0 });
}

/// Input volume of a device: master element first, then the numbered
/// channels, defaulting to 1.0 when none yields a value.
pub fn volume<B: AudioBackend>(backend: &B, device: DeviceId) -> f32 {
    if backend.has_volume(device, MASTER_ELEMENT) {
        if let Ok(volume) = backend.volume(device, MASTER_ELEMENT) {
            return volume;
        }
    }

    // Some devices only publish per-channel volume.
    for channel in CHANNEL_ELEMENTS {
        if backend.has_volume(device, channel) {
            if let Ok(volume) = backend.volume(device, channel) {
                return volume;
            }
        }
    }

    1.0
}

/// Set the input volume of a device.
///
/// A successful write to the master element is sufficient; otherwise each
/// numbered channel is written individually, ignoring per-channel failures.
pub fn set_volume<B: AudioBackend>(backend: &B, device: DeviceId, volume: f32) {
    if backend.has_volume(device, MASTER_ELEMENT) && backend.volume_settable(device, MASTER_ELEMENT)
    {
        if backend.set_volume(device, MASTER_ELEMENT, volume).is_ok() {
            return;
        }
    }

    for channel in CHANNEL_ELEMENTS {
        if backend.has_volume(device, channel) && backend.volume_settable(device, channel) {
            backend.set_volume(device, channel, volume).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{FakeBackend, FakeDevice};

    #[test]
    fn test_enumeration_excludes_devices_without_input_buffers() {
        let backend = FakeBackend::new();
        backend.add(1, FakeDevice::input());
        backend.add(2, FakeDevice::output_only());
        backend.add(3, FakeDevice::input());

        assert_eq!(input_devices(&backend), vec![1, 3]);
    }

    #[test]
    fn test_enumeration_is_empty_when_device_list_query_fails() {
        let backend = FakeBackend::new();
        backend.add(1, FakeDevice::input());
        backend.fail_device_list();

        assert!(input_devices(&backend).is_empty());
    }

    #[test]
    fn test_display_name_falls_back_when_unreadable() {
        let backend = FakeBackend::new();
        backend.add(1, FakeDevice::input().named("Built-in Microphone"));
        backend.add(2, FakeDevice::input());

        assert_eq!(display_name(&backend, 1), "Built-in Microphone");
        assert_eq!(display_name(&backend, 2), FALLBACK_DEVICE_NAME);
    }

    #[test]
    fn test_mute_read_prefers_hardware_control() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_mute(true, true)
                .with_volume(MASTER_ELEMENT, 0.8, true),
        );

        // Hardware control says muted even though volume is up.
        assert!(is_muted(&backend, 1));
    }

    #[test]
    fn test_mute_read_without_hardware_control_uses_zero_volume() {
        let backend = FakeBackend::new();
        backend.add(1, FakeDevice::input().with_volume(MASTER_ELEMENT, 0.0, true));
        backend.add(2, FakeDevice::input().with_volume(MASTER_ELEMENT, 0.5, true));

        assert!(is_muted(&backend, 1));
        assert!(!is_muted(&backend, 2));
    }

    #[test]
    fn test_mute_read_failure_falls_back_to_volume() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_failing_mute_read()
                .with_volume(MASTER_ELEMENT, 0.0, true),
        );

        assert!(is_muted(&backend, 1));
    }

    #[test]
    fn test_set_mute_uses_hardware_control_without_touching_volume() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_mute(false, true)
                .with_volume(MASTER_ELEMENT, 0.6, true),
        );

        set_muted(&backend, 1, true);
        assert_eq!(backend.mute_of(1), Some(true));
        assert_eq!(backend.volume_of(1, MASTER_ELEMENT), Some(0.6));

        set_muted(&backend, 1, false);
        assert_eq!(backend.mute_of(1), Some(false));
        assert_eq!(backend.volume_of(1, MASTER_ELEMENT), Some(0.6));
    }

    #[test]
    fn test_set_mute_without_hardware_control_drives_volume() {
        let backend = FakeBackend::new();
        backend.add(1, FakeDevice::input().with_volume(MASTER_ELEMENT, 0.6, true));

        set_muted(&backend, 1, true);
        assert_eq!(backend.volume_of(1, MASTER_ELEMENT), Some(0.0));

        // Unmute restores to full volume, not the previous 0.6.
        set_muted(&backend, 1, false);
        assert_eq!(backend.volume_of(1, MASTER_ELEMENT), Some(1.0));
    }

    #[test]
    fn test_set_mute_read_only_hardware_control_drives_volume() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_mute(false, false)
                .with_volume(MASTER_ELEMENT, 0.4, true),
        );

        set_muted(&backend, 1, true);
        assert_eq!(backend.mute_of(1), Some(false));
        assert_eq!(backend.volume_of(1, MASTER_ELEMENT), Some(0.0));
    }

    #[test]
    fn test_set_mute_hardware_write_failure_drives_volume() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_failing_mute_write()
                .with_volume(MASTER_ELEMENT, 0.4, true),
        );

        set_muted(&backend, 1, true);
        assert_eq!(backend.volume_of(1, MASTER_ELEMENT), Some(0.0));
    }

    #[test]
    fn test_volume_prefers_master_element() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_volume(MASTER_ELEMENT, 0.3, true)
                .with_volume(1, 0.9, true),
        );

        assert_eq!(volume(&backend, 1), 0.3);
    }

    #[test]
    fn test_volume_falls_back_to_channel_one() {
        let backend = FakeBackend::new();
        backend.add(1, FakeDevice::input().with_volume(1, 0.7, true));

        assert_eq!(volume(&backend, 1), 0.7);
    }

    #[test]
    fn test_volume_falls_back_to_channel_two() {
        let backend = FakeBackend::new();
        backend.add(1, FakeDevice::input().with_volume(2, 0.2, true));

        assert_eq!(volume(&backend, 1), 0.2);
    }

    #[test]
    fn test_volume_defaults_to_full_without_controls() {
        let backend = FakeBackend::new();
        backend.add(1, FakeDevice::input());

        assert_eq!(volume(&backend, 1), 1.0);
    }

    #[test]
    fn test_set_volume_master_write_short_circuits() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_volume(MASTER_ELEMENT, 0.5, true)
                .with_volume(1, 0.5, true)
                .with_volume(2, 0.5, true),
        );

        set_volume(&backend, 1, 0.0);
        assert_eq!(backend.volume_of(1, MASTER_ELEMENT), Some(0.0));
        assert_eq!(backend.volume_of(1, 1), Some(0.5));
        assert_eq!(backend.volume_of(1, 2), Some(0.5));
    }

    #[test]
    fn test_set_volume_writes_channels_when_master_is_absent() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_volume(1, 0.5, true)
                .with_volume(2, 0.5, true),
        );

        set_volume(&backend, 1, 1.0);
        assert_eq!(backend.volume_of(1, 1), Some(1.0));
        assert_eq!(backend.volume_of(1, 2), Some(1.0));
    }

    #[test]
    fn test_set_volume_writes_channels_when_master_is_read_only() {
        let backend = FakeBackend::new();
        backend.add(
            1,
            FakeDevice::input()
                .with_volume(MASTER_ELEMENT, 0.5, false)
                .with_volume(1, 0.5, true),
        );

        set_volume(&backend, 1, 0.0);
        assert_eq!(backend.volume_of(1, MASTER_ELEMENT), Some(0.5));
        assert_eq!(backend.volume_of(1, 1), Some(0.0));
    }
}
