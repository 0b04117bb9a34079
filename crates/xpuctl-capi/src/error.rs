//! Status codes and last-error reporting.
//!
//! Facade functions never unwind across the boundary. A failing call
//! records a message in a thread-local slot and returns a sentinel; the
//! caller reads the message through [`xpuctl_last_error_message`]. Every
//! fallible entry point clears the slot on entry, so the message always
//! describes the most recent call on the thread.

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};

use thiserror::Error;
use tracing::warn;
use xpuctl_runtime::RuntimeError;

/// Operation completed.
pub const XPUCTL_SUCCESS: c_int = 0;
/// A required pointer argument was null.
pub const XPUCTL_ERROR_NULL_POINTER: c_int = -1;
/// A string argument was not valid UTF-8.
pub const XPUCTL_ERROR_INVALID_UTF8: c_int = -2;
/// A selector string failed to parse.
pub const XPUCTL_ERROR_INVALID_SELECTOR: c_int = -3;
/// No device satisfied the request.
pub const XPUCTL_ERROR_DEVICE_NOT_FOUND: c_int = -4;
/// No platform of the requested backend is present.
pub const XPUCTL_ERROR_PLATFORM_NOT_FOUND: c_int = -5;
/// An index was past the end of the addressed collection.
pub const XPUCTL_ERROR_OUT_OF_RANGE: c_int = -6;
/// An enum argument was outside its defined range.
pub const XPUCTL_ERROR_INVALID_ENUM: c_int = -7;
/// The calling thread had no activated queue.
pub const XPUCTL_ERROR_EMPTY_STACK: c_int = -8;

/// Failure surfaced across the C boundary.
#[derive(Debug, Error)]
pub enum XpuctlCError {
    #[error("null pointer argument: {0}")]
    NullPointer(&'static str),

    #[error("invalid UTF-8 in argument: {0}")]
    InvalidUtf8(&'static str),

    #[error("invalid enum value {value} for {kind}")]
    InvalidEnum { kind: &'static str, value: i32 },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl XpuctlCError {
    /// Status code reported for this error.
    pub fn code(&self) -> c_int {
        match self {
            XpuctlCError::NullPointer(_) => XPUCTL_ERROR_NULL_POINTER,
            XpuctlCError::InvalidUtf8(_) => XPUCTL_ERROR_INVALID_UTF8,
            XpuctlCError::InvalidEnum { .. } => XPUCTL_ERROR_INVALID_ENUM,
            XpuctlCError::Runtime(err) => match err {
                RuntimeError::InvalidFilter { .. } => XPUCTL_ERROR_INVALID_SELECTOR,
                RuntimeError::DeviceNotFound { .. } => XPUCTL_ERROR_DEVICE_NOT_FOUND,
                RuntimeError::PlatformNotFound { .. } => XPUCTL_ERROR_PLATFORM_NOT_FOUND,
                RuntimeError::QueueIndexOutOfRange { .. } => XPUCTL_ERROR_OUT_OF_RANGE,
                RuntimeError::EmptyActivationStack => XPUCTL_ERROR_EMPTY_STACK,
            },
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

pub(crate) fn set_last_error(err: &XpuctlCError) {
    warn!("facade call failed: {err}");
    let message = CString::new(err.to_string()).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Message for the most recent failure on this thread, or null when the
/// last fallible call succeeded.
///
/// The pointer stays valid until the next fallible facade call on the
/// same thread. Do not free it.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_last_error_message() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |message| message.as_ptr())
    })
}

/// Clear this thread's last-error slot.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_clear_last_error() {
    clear_last_error();
}
