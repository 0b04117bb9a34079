//! Facade-wide basics: version, status-code stability, the last-error
//! lifecycle, null robustness, and concurrent read-only use.

use std::ffi::{CStr, CString};
use std::sync::{Arc, Barrier};

use xpuctl_capi::{
    xpuctl_clear_last_error, xpuctl_device_backend, xpuctl_device_free,
    xpuctl_device_from_selector, xpuctl_device_max_compute_units, xpuctl_device_name,
    xpuctl_device_type, xpuctl_filter_selector_new, xpuctl_last_error_message,
    xpuctl_selector_free, xpuctl_size_array_free, xpuctl_string_free, xpuctl_version,
    XpuctlBackend, XpuctlDeviceType, XPUCTL_ERROR_DEVICE_NOT_FOUND, XPUCTL_ERROR_EMPTY_STACK,
    XPUCTL_ERROR_INVALID_ENUM, XPUCTL_ERROR_INVALID_SELECTOR, XPUCTL_ERROR_INVALID_UTF8,
    XPUCTL_ERROR_NULL_POINTER, XPUCTL_ERROR_OUT_OF_RANGE, XPUCTL_ERROR_PLATFORM_NOT_FOUND,
    XPUCTL_SUCCESS,
};

// ── version ──────────────────────────────────────────────────────────

/// The version string is static, NUL-terminated, and matches the crate.
#[test]
fn version_is_reported() {
    let ptr = xpuctl_version();
    assert!(!ptr.is_null());
    let version = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
    // A second call hands out the same storage.
    assert_eq!(ptr, xpuctl_version());
}

// ── status codes ─────────────────────────────────────────────────────

/// Status codes are ABI constants; renumbering them breaks C callers.
#[test]
fn status_codes_are_stable() {
    assert_eq!(XPUCTL_SUCCESS, 0);
    assert_eq!(XPUCTL_ERROR_NULL_POINTER, -1);
    assert_eq!(XPUCTL_ERROR_INVALID_UTF8, -2);
    assert_eq!(XPUCTL_ERROR_INVALID_SELECTOR, -3);
    assert_eq!(XPUCTL_ERROR_DEVICE_NOT_FOUND, -4);
    assert_eq!(XPUCTL_ERROR_PLATFORM_NOT_FOUND, -5);
    assert_eq!(XPUCTL_ERROR_OUT_OF_RANGE, -6);
    assert_eq!(XPUCTL_ERROR_INVALID_ENUM, -7);
    assert_eq!(XPUCTL_ERROR_EMPTY_STACK, -8);
}

// ── last-error lifecycle ─────────────────────────────────────────────

/// A failing call records a message; the next succeeding call clears it.
#[test]
fn last_error_follows_the_most_recent_call() {
    assert!(xpuctl_device_name(std::ptr::null_mut()).is_null());
    assert!(!xpuctl_last_error_message().is_null());

    let raw = CString::new("cpu").unwrap();
    let sref = xpuctl_filter_selector_new(raw.as_ptr());
    assert!(!sref.is_null());
    assert!(xpuctl_last_error_message().is_null());
    xpuctl_selector_free(sref);
}

/// An unresolvable selector names itself in the error message.
#[test]
fn unresolved_selector_is_named_in_the_error() {
    let raw = CString::new("custom").unwrap();
    let sref = xpuctl_filter_selector_new(raw.as_ptr());
    assert!(!sref.is_null());
    let dref = xpuctl_device_from_selector(sref);
    xpuctl_selector_free(sref);
    if !dref.is_null() {
        // Some topologies do carry a custom device; nothing to check.
        xpuctl_device_free(dref);
        return;
    }
    let message = unsafe { CStr::from_ptr(xpuctl_last_error_message()) }
        .to_str()
        .unwrap();
    assert!(message.contains("custom"), "{message}");
}

/// Clearing the slot works and is idempotent.
#[test]
fn clear_last_error_is_idempotent() {
    assert!(xpuctl_device_name(std::ptr::null_mut()).is_null());
    assert!(!xpuctl_last_error_message().is_null());
    xpuctl_clear_last_error();
    assert!(xpuctl_last_error_message().is_null());
    xpuctl_clear_last_error();
    assert!(xpuctl_last_error_message().is_null());
}

// ── null robustness ──────────────────────────────────────────────────

/// Every accessor tolerates a null handle and returns its sentinel.
#[test]
fn null_handles_return_sentinels() {
    assert_eq!(
        xpuctl_device_backend(std::ptr::null_mut()),
        XpuctlBackend::Unknown
    );
    assert_eq!(
        xpuctl_device_type(std::ptr::null_mut()),
        XpuctlDeviceType::Unknown
    );
    assert_eq!(xpuctl_device_max_compute_units(std::ptr::null_mut()), 0);
    assert!(xpuctl_device_name(std::ptr::null_mut()).is_null());
    xpuctl_device_free(std::ptr::null_mut());
    xpuctl_string_free(std::ptr::null_mut());
    xpuctl_size_array_free(std::ptr::null_mut(), 3);
}

// ── concurrency smoke ────────────────────────────────────────────────

/// Read-only facade use from several threads at once stays coherent.
#[test]
fn concurrent_readers_agree() {
    let threads = 4;
    let barrier = Arc::new(Barrier::new(threads));
    let mut handles = Vec::with_capacity(threads);
    for _ in 0..threads {
        let barrier = Arc::clone(&barrier);
        handles.push(std::thread::spawn(move || {
            barrier.wait();
            let raw = CString::new("cpu").unwrap();
            let sref = xpuctl_filter_selector_new(raw.as_ptr());
            assert!(!sref.is_null());
            let dref = xpuctl_device_from_selector(sref);
            xpuctl_selector_free(sref);
            if dref.is_null() {
                return None;
            }
            let name_ptr = xpuctl_device_name(dref);
            let name = unsafe { CStr::from_ptr(name_ptr) }.to_str().unwrap().to_string();
            xpuctl_string_free(name_ptr);
            xpuctl_device_free(dref);
            Some(name)
        }));
    }
    let names: Vec<Option<String>> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    for pair in names.windows(2) {
        assert_eq!(pair[0], pair[1]);
    }
}
