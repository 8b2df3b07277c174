//! CoreAudio HAL implementation of [`AudioBackend`].
//!
//! Thin unsafe wrappers over the `AudioObject*` property calls. All status
//! checks surface as [`AudioError::Os`]; policy (fallbacks, defaults) lives a
//! layer up in [`crate::device`].

use std::mem;
use std::ptr;

use core_foundation::base::TCFType;
use core_foundation::string::CFString;
use coreaudio_sys::{
    kAudioDevicePropertyDeviceNameCFString, kAudioDevicePropertyMute,
    kAudioDevicePropertyScopeInput, kAudioDevicePropertyStreamConfiguration,
    kAudioDevicePropertyVolumeScalar, kAudioHardwarePropertyDevices,
    kAudioObjectPropertyElementMaster, kAudioObjectPropertyScopeGlobal, kAudioObjectSystemObject,
    AudioBufferList, AudioObjectGetPropertyData, AudioObjectGetPropertyDataSize,
    AudioObjectHasProperty, AudioObjectID, AudioObjectIsPropertySettable,
    AudioObjectPropertyAddress, AudioObjectSetPropertyData, Boolean, CFStringRef, OSStatus,
};

use crate::backend::{AudioBackend, AudioError, DeviceId, Result};

const OK: OSStatus = 0;

/// Property access against the live CoreAudio HAL.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreAudioBackend;

fn input_address(selector: u32, element: u32) -> AudioObjectPropertyAddress {
    AudioObjectPropertyAddress {
        mSelector: selector,
        mScope: kAudioDevicePropertyScopeInput,
        mElement: element,
    }
}

fn has_property(device: AudioObjectID, address: &AudioObjectPropertyAddress) -> bool {
    unsafe { AudioObjectHasProperty(device, address) != 0 }
}

fn is_settable(device: AudioObjectID, address: &AudioObjectPropertyAddress) -> bool {
    let mut settable: Boolean = 0;
    let status = unsafe { AudioObjectIsPropertySettable(device, address, &mut settable) };
    status == OK && settable != 0
}

fn get_property<T>(
    device: AudioObjectID,
    address: &AudioObjectPropertyAddress,
    what: &'static str,
) -> Result<T> {
    let mut data = mem::MaybeUninit::<T>::uninit();
    let mut size = mem::size_of::<T>() as u32;
    let status = unsafe {
        AudioObjectGetPropertyData(
            device,
            address,
            0,
            ptr::null(),
            &mut size,
            data.as_mut_ptr().cast(),
        )
    };
    if status != OK {
        return Err(AudioError::Os { status, what });
    }
    Ok(unsafe { data.assume_init() })
}

fn set_property<T>(
    device: AudioObjectID,
    address: &AudioObjectPropertyAddress,
    value: &T,
    what: &'static str,
) -> Result<()> {
    let status = unsafe {
        AudioObjectSetPropertyData(
            device,
            address,
            0,
            ptr::null(),
            mem::size_of::<T>() as u32,
            (value as *const T).cast(),
        )
    };
    if status != OK {
        return Err(AudioError::Os { status, what });
    }
    Ok(())
}

impl AudioBackend for CoreAudioBackend {
    fn devices(&self) -> Result<Vec<DeviceId>> {
        let address = AudioObjectPropertyAddress {
            mSelector: kAudioHardwarePropertyDevices,
            mScope: kAudioObjectPropertyScopeGlobal,
            mElement: kAudioObjectPropertyElementMaster,
        };

        let mut size: u32 = 0;
        let status = unsafe {
            AudioObjectGetPropertyDataSize(
                kAudioObjectSystemObject,
                &address,
                0,
                ptr::null(),
                &mut size,
            )
        };
        if status != OK {
            return Err(AudioError::Os {
                status,
                what: "device list size query",
            });
        }

        let count = size as usize / mem::size_of::<AudioObjectID>();
        let mut devices = vec![0 as AudioObjectID; count];
        let status = unsafe {
            AudioObjectGetPropertyData(
                kAudioObjectSystemObject,
                &address,
                0,
                ptr::null(),
                &mut size,
                devices.as_mut_ptr().cast(),
            )
        };
        if status != OK {
            return Err(AudioError::Os {
                status,
                what: "device list query",
            });
        }

        devices.truncate(size as usize / mem::size_of::<AudioObjectID>());
        Ok(devices)
    }

    fn input_buffer_count(&self, device: DeviceId) -> Result<u32> {
        let address = input_address(
            kAudioDevicePropertyStreamConfiguration,
            kAudioObjectPropertyElementMaster,
        );

        let mut size: u32 = 0;
        let status =
            unsafe { AudioObjectGetPropertyDataSize(device, &address, 0, ptr::null(), &mut size) };
        if status != OK {
            return Err(AudioError::Os {
                status,
                what: "stream configuration size query",
            });
        }
        if size == 0 {
            return Ok(0);
        }

        // The buffer list is variable-length; over-allocate u32s to keep the
        // required alignment.
        let mut buffer = vec![0u32; (size as usize).div_ceil(mem::size_of::<u32>())];
        let status = unsafe {
            AudioObjectGetPropertyData(
                device,
                &address,
                0,
                ptr::null(),
                &mut size,
                buffer.as_mut_ptr().cast(),
            )
        };
        if status != OK {
            return Err(AudioError::Os {
                status,
                what: "stream configuration query",
            });
        }

        let list = unsafe { &*(buffer.as_ptr() as *const AudioBufferList) };
        Ok(list.mNumberBuffers)
    }

    fn device_name(&self, device: DeviceId) -> Result<String> {
        let address = AudioObjectPropertyAddress {
            mSelector: kAudioDevicePropertyDeviceNameCFString,
            mScope: kAudioObjectPropertyScopeGlobal,
            mElement: kAudioObjectPropertyElementMaster,
        };

        let name: CFStringRef = get_property(device, &address, "device name query")?;
        if name.is_null() {
            return Err(AudioError::Unsupported {
                device,
                control: "name",
            });
        }

        // The get call hands us a +1 reference.
        let name = unsafe { CFString::wrap_under_create_rule(name.cast()) };
        Ok(name.to_string())
    }

    fn supports_mute(&self, device: DeviceId) -> bool {
        let address = input_address(kAudioDevicePropertyMute, kAudioObjectPropertyElementMaster);
        has_property(device, &address)
    }

    fn mute_settable(&self, device: DeviceId) -> bool {
        let address = input_address(kAudioDevicePropertyMute, kAudioObjectPropertyElementMaster);
        is_settable(device, &address)
    }

    fn mute(&self, device: DeviceId) -> Result<bool> {
        let address = input_address(kAudioDevicePropertyMute, kAudioObjectPropertyElementMaster);
        let muted: u32 = get_property(device, &address, "mute read")?;
        Ok(muted != 0)
    }

    fn set_mute(&self, device: DeviceId, mute: bool) -> Result<()> {
        let address = input_address(kAudioDevicePropertyMute, kAudioObjectPropertyElementMaster);
        let value: u32 = if mute { 1 } else { 0 };
        set_property(device, &address, &value, "mute write")
    }

    fn has_volume(&self, device: DeviceId, element: u32) -> bool {
        let address = input_address(kAudioDevicePropertyVolumeScalar, element);
        has_property(device, &address)
    }

    fn volume_settable(&self, device: DeviceId, element: u32) -> bool {
        let address = input_address(kAudioDevicePropertyVolumeScalar, element);
        is_settable(device, &address)
    }

    fn volume(&self, device: DeviceId, element: u32) -> Result<f32> {
        let address = input_address(kAudioDevicePropertyVolumeScalar, element);
        get_property(device, &address, "volume read")
    }

    fn set_volume(&self, device: DeviceId, element: u32, volume: f32) -> Result<()> {
        let address = input_address(kAudioDevicePropertyVolumeScalar, element);
        set_property(device, &address, &volume, "volume write")
    }
}
