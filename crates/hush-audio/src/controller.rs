//! Aggregate mute state across every input device.

use std::collections::HashMap;

use hush_core::MicState;
use tracing::info;

use crate::backend::{AudioBackend, DeviceId};
use crate::device;

/// A detected input device, as shown in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    pub id: DeviceId,
    pub name: String,
}

/// Owns the process-wide mute flag and applies mute/unmute to every input
/// device in one sweep.
///
/// The flag tracks the last state this controller applied; [`refresh`]
/// re-derives it from the first enumerated device, which is how the state is
/// seeded at startup. Volumes are recorded into a per-device map at mute time.
/// Unmuting goes through hardware mute-off or a full-volume write and does
/// not consult that map.
///
/// [`refresh`]: MuteController::refresh
pub struct MuteController<B: AudioBackend> {
    backend: B,
    muted: bool,
    saved_volumes: HashMap<DeviceId, f32>,
}

impl<B: AudioBackend> MuteController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            muted: false,
            saved_volumes: HashMap::new(),
        }
    }

    pub fn state(&self) -> MicState {
        MicState::from_muted(self.muted)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Re-derive the aggregate flag from the first enumerated input device.
    pub fn refresh(&mut self) -> MicState {
        let devices = device::input_devices(&self.backend);
        if let Some(&first) = devices.first() {
            self.muted = device::is_muted(&self.backend, first);
        }
        self.state()
    }

    /// Flip the aggregate state and apply it to every input device.
    pub fn toggle(&mut self) -> MicState {
        self.set_muted(!self.muted)
    }

    /// Apply a mute state to every input device, recording each device's
    /// current volume first when muting.
    pub fn set_muted(&mut self, mute: bool) -> MicState {
        self.muted = mute;

        let devices = device::input_devices(&self.backend);
        for &dev in &devices {
            if mute {
                self.saved_volumes
                    .insert(dev, device::volume(&self.backend, dev));
            }
            device::set_muted(&self.backend, dev, mute);
        }

        info!(muted = mute, devices = devices.len(), "applied input mute");
        self.state()
    }

    /// The detected input devices with display names, for the menu.
    pub fn devices(&self) -> Vec<InputDevice> {
        device::input_devices(&self.backend)
            .into_iter()
            .map(|id| InputDevice {
                id,
                name: device::display_name(&self.backend, id),
            })
            .collect()
    }

    /// Volume recorded for a device at the last mute, if any.
    pub fn saved_volume(&self, device: DeviceId) -> Option<f32> {
        self.saved_volumes.get(&device).copied()
    }
}
