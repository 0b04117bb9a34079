//! Device handle creation and property accessors.
//!
//! Accessors forward to the native [`Device`] and never panic: a null
//! handle records a last error and returns the documented sentinel.

use std::os::raw::c_char;

use tracing::debug;
use xpuctl_runtime::{Aspect, Device, Registry};

use crate::enums::{XpuctlAspect, XpuctlBackend, XpuctlDeviceType};
use crate::error::{clear_last_error, set_last_error, XpuctlCError};
use crate::platform_interface::XpuctlPlatformRef;
use crate::selector_interface::XpuctlSelectorRef;
use crate::utils::{deref_arg, export_string};

/// Handle to an enumerated device. The pointee is the native [`Device`];
/// release with [`xpuctl_device_free`].
pub type XpuctlDeviceRef = *mut Device;

/// Resolve `selector` to a device handle.
///
/// Returns null when no device in this process satisfies the selector;
/// the last error then names the filter that failed to resolve.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_from_selector(selector: XpuctlSelectorRef) -> XpuctlDeviceRef {
    clear_last_error();
    let selector = match unsafe { deref_arg(selector, "selector") } {
        Ok(selector) => selector,
        Err(err) => {
            set_last_error(&err);
            return std::ptr::null_mut();
        }
    };
    match selector.resolve() {
        Ok(device) => {
            debug!("selector '{}' resolved to {}", selector.raw(), device.summary());
            Box::into_raw(Box::new(device))
        }
        Err(err) => {
            set_last_error(&XpuctlCError::from(err));
            std::ptr::null_mut()
        }
    }
}

/// Release a device handle. Null is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_free(device: XpuctlDeviceRef) {
    if device.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(device) });
}

/// Backend of the device, or `Unknown` on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_backend(device: XpuctlDeviceRef) -> XpuctlBackend {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => XpuctlBackend::from(device.backend()),
        Err(err) => {
            set_last_error(&err);
            XpuctlBackend::Unknown
        }
    }
}

/// Device type of the device, or `Unknown` on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_type(device: XpuctlDeviceRef) -> XpuctlDeviceType {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => XpuctlDeviceType::from(device.device_type()),
        Err(err) => {
            set_last_error(&err);
            XpuctlDeviceType::Unknown
        }
    }
}

/// Device name. Caller releases with [`xpuctl_string_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_name(device: XpuctlDeviceRef) -> *mut c_char {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => export_string(device.name()),
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// Device vendor. Caller releases with [`xpuctl_string_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_vendor(device: XpuctlDeviceRef) -> *mut c_char {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => export_string(device.vendor()),
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// Driver version string. Caller releases with [`xpuctl_string_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_driver_version(device: XpuctlDeviceRef) -> *mut c_char {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => export_string(device.driver_version()),
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// Maximum compute units, or 0 on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_max_compute_units(device: XpuctlDeviceRef) -> u32 {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.max_compute_units(),
        Err(err) => {
            set_last_error(&err);
            0
        }
    }
}

/// Number of work-item dimensions, or 0 on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_max_work_item_dims(device: XpuctlDeviceRef) -> u32 {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.max_work_item_dims(),
        Err(err) => {
            set_last_error(&err);
            0
        }
    }
}

/// Maximum work-item sizes per dimension, as a heap array of
/// [`xpuctl_device_max_work_item_dims`] entries. Caller releases with
/// [`xpuctl_size_array_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_max_work_item_sizes(device: XpuctlDeviceRef) -> *mut usize {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => {
            let sizes: Box<[usize]> = Box::new(device.max_work_item_sizes());
            Box::into_raw(sizes) as *mut usize
        }
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// Maximum work-group size, or 0 on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_max_work_group_size(device: XpuctlDeviceRef) -> usize {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.max_work_group_size(),
        Err(err) => {
            set_last_error(&err);
            0
        }
    }
}

/// Maximum number of sub-groups, or 0 on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_max_num_sub_groups(device: XpuctlDeviceRef) -> u32 {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.max_num_sub_groups(),
        Err(err) => {
            set_last_error(&err);
            0
        }
    }
}

/// Platform the device belongs to. Caller releases with
/// [`xpuctl_platform_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_platform(device: XpuctlDeviceRef) -> XpuctlPlatformRef {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => match Registry::global().platform(device.backend()) {
            Some(platform) => Box::into_raw(Box::new(platform)),
            None => {
                set_last_error(&XpuctlCError::from(
                    xpuctl_runtime::RuntimeError::PlatformNotFound {
                        backend: device.backend(),
                    },
                ));
                std::ptr::null_mut()
            }
        },
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// Whether the device reports `aspect`. False on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_has_aspect(device: XpuctlDeviceRef, aspect: XpuctlAspect) -> bool {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.has(Aspect::from(aspect)),
        Err(err) => {
            set_last_error(&err);
            false
        }
    }
}

/// Whether the device supports 64-bit base atomics.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_has_int64_base_atomics(device: XpuctlDeviceRef) -> bool {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.has(Aspect::Int64BaseAtomics),
        Err(err) => {
            set_last_error(&err);
            false
        }
    }
}

/// Whether the device supports 64-bit extended atomics.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_has_int64_extended_atomics(device: XpuctlDeviceRef) -> bool {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.has(Aspect::Int64ExtendedAtomics),
        Err(err) => {
            set_last_error(&err);
            false
        }
    }
}

/// Whether the device is a CPU. False on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_is_cpu(device: XpuctlDeviceRef) -> bool {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.is_cpu(),
        Err(err) => {
            set_last_error(&err);
            false
        }
    }
}

/// Whether the device is a GPU. False on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_is_gpu(device: XpuctlDeviceRef) -> bool {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.is_gpu(),
        Err(err) => {
            set_last_error(&err);
            false
        }
    }
}

/// Whether the device is an accelerator. False on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_is_accelerator(device: XpuctlDeviceRef) -> bool {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.is_accelerator(),
        Err(err) => {
            set_last_error(&err);
            false
        }
    }
}

/// Whether the device is the host device. False on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_device_is_host(device: XpuctlDeviceRef) -> bool {
    clear_last_error();
    match unsafe { deref_arg(device, "device") } {
        Ok(device) => device.is_host(),
        Err(err) => {
            set_last_error(&err);
            false
        }
    }
}
