//! C-linkage facade over the xpuctl runtime.
//!
//! Handles returned by this crate point directly at the native objects,
//! so Rust callers (the verification suite included) may dereference a
//! handle to cross-check a facade answer against the wrapped object. C
//! callers treat them as opaque.
//!
//! Lifetime rules: every handle from a `*_new`, `*_from_*`, or queue
//! lookup call is released exactly once through its paired free
//! function; strings go back through [`xpuctl_string_free`] and size
//! arrays through [`xpuctl_size_array_free`]. Free functions accept
//! null. Failures never unwind; they record a per-thread message
//! readable via [`xpuctl_last_error_message`] and return a sentinel.

pub mod device_interface;
pub mod enums;
pub mod error;
pub mod platform_interface;
pub mod queue_interface;
pub mod queue_manager_interface;
pub mod selector_interface;
pub mod utils;

pub use device_interface::*;
pub use enums::*;
pub use error::*;
pub use platform_interface::*;
pub use queue_interface::*;
pub use queue_manager_interface::*;
pub use selector_interface::*;
pub use utils::*;
