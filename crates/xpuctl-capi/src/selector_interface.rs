//! Selector creation and release.

use std::os::raw::c_char;

use tracing::debug;
use xpuctl_runtime::FilterSelector;

use crate::error::{clear_last_error, set_last_error, XpuctlCError};
use crate::utils::cstr_arg;

/// Handle to a parsed device selector. The pointee is the native
/// [`FilterSelector`]; release with [`xpuctl_selector_free`].
pub type XpuctlSelectorRef = *mut FilterSelector;

/// Parse `filter` into a selector handle.
///
/// Returns null and records a last error when `filter` is null, not
/// UTF-8, or not a valid filter string.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_filter_selector_new(filter: *const c_char) -> XpuctlSelectorRef {
    clear_last_error();
    let raw = match unsafe { cstr_arg(filter, "filter") } {
        Ok(raw) => raw,
        Err(err) => {
            set_last_error(&err);
            return std::ptr::null_mut();
        }
    };
    match FilterSelector::parse(raw) {
        Ok(selector) => {
            debug!("created selector '{}'", selector.raw());
            Box::into_raw(Box::new(selector))
        }
        Err(err) => {
            set_last_error(&XpuctlCError::from(err));
            std::ptr::null_mut()
        }
    }
}

/// Release a selector handle. Null is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_selector_free(selector: XpuctlSelectorRef) {
    if selector.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(selector) });
}
