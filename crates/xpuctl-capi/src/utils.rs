//! Version reporting, release helpers, and argument checks shared by the
//! facade modules.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::error::XpuctlCError;

static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Facade version. Static string, do not free.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}

/// Release a string returned by the facade. Null is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_string_free(string: *mut c_char) {
    if string.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(string) });
}

/// Release a size array returned by the facade, given the length the
/// facade reported for it. Null is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_size_array_free(array: *mut usize, len: usize) {
    if array.is_null() {
        return;
    }
    let slice = std::ptr::slice_from_raw_parts_mut(array, len);
    drop(unsafe { Box::from_raw(slice) });
}

/// Borrow a UTF-8 string argument.
pub(crate) unsafe fn cstr_arg<'a>(
    ptr: *const c_char,
    name: &'static str,
) -> Result<&'a str, XpuctlCError> {
    if ptr.is_null() {
        return Err(XpuctlCError::NullPointer(name));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| XpuctlCError::InvalidUtf8(name))
}

/// Borrow the native object behind a handle argument.
pub(crate) unsafe fn deref_arg<'a, T>(
    ptr: *mut T,
    name: &'static str,
) -> Result<&'a T, XpuctlCError> {
    if ptr.is_null() {
        return Err(XpuctlCError::NullPointer(name));
    }
    Ok(unsafe { &*ptr })
}

/// Export an owned C string; the caller frees it with
/// [`xpuctl_string_free`].
pub(crate) fn export_string(value: &str) -> *mut c_char {
    CString::new(value).unwrap_or_default().into_raw()
}
