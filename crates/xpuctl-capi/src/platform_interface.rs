//! Platform handle accessors.

use std::os::raw::c_char;

use xpuctl_runtime::Platform;

use crate::enums::XpuctlBackend;
use crate::error::{clear_last_error, set_last_error};
use crate::utils::{deref_arg, export_string};

/// Handle to a platform. The pointee is the native [`Platform`]; release
/// with [`xpuctl_platform_free`].
pub type XpuctlPlatformRef = *mut Platform;

/// Release a platform handle. Null is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_platform_free(platform: XpuctlPlatformRef) {
    if platform.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(platform) });
}

/// Backend of the platform, or `Unknown` on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_platform_backend(platform: XpuctlPlatformRef) -> XpuctlBackend {
    clear_last_error();
    match unsafe { deref_arg(platform, "platform") } {
        Ok(platform) => XpuctlBackend::from(platform.backend()),
        Err(err) => {
            set_last_error(&err);
            XpuctlBackend::Unknown
        }
    }
}

/// Platform name. Caller releases with [`xpuctl_string_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_platform_name(platform: XpuctlPlatformRef) -> *mut c_char {
    clear_last_error();
    match unsafe { deref_arg(platform, "platform") } {
        Ok(platform) => export_string(platform.name()),
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// Platform vendor. Caller releases with [`xpuctl_string_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_platform_vendor(platform: XpuctlPlatformRef) -> *mut c_char {
    clear_last_error();
    match unsafe { deref_arg(platform, "platform") } {
        Ok(platform) => export_string(platform.vendor()),
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// Platform version string. Caller releases with [`xpuctl_string_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_platform_version(platform: XpuctlPlatformRef) -> *mut c_char {
    clear_last_error();
    match unsafe { deref_arg(platform, "platform") } {
        Ok(platform) => export_string(platform.version()),
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}
