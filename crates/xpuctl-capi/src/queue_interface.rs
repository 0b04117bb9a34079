//! Queue handle accessors.

use xpuctl_runtime::Queue;

use crate::device_interface::XpuctlDeviceRef;
use crate::enums::XpuctlBackend;
use crate::error::{clear_last_error, set_last_error};
use crate::utils::deref_arg;

/// Handle to a queue. The pointee is the native [`Queue`]; release with
/// [`xpuctl_queue_free`]. Queues are reference-counted, so releasing one
/// handle never invalidates another handle to the same queue.
pub type XpuctlQueueRef = *mut Queue;

/// Release a queue handle. Null is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_free(queue: XpuctlQueueRef) {
    if queue.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(queue) });
}

/// Device the queue is bound to. Caller releases with
/// [`xpuctl_device_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_device(queue: XpuctlQueueRef) -> XpuctlDeviceRef {
    clear_last_error();
    match unsafe { deref_arg(queue, "queue") } {
        Ok(queue) => Box::into_raw(Box::new(queue.device().clone())),
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// Backend of the queue's device, or `Unknown` on a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_backend(queue: XpuctlQueueRef) -> XpuctlBackend {
    clear_last_error();
    match unsafe { deref_arg(queue, "queue") } {
        Ok(queue) => XpuctlBackend::from(queue.backend()),
        Err(err) => {
            set_last_error(&err);
            XpuctlBackend::Unknown
        }
    }
}

/// Whether the queue executes in submission order. False on a null
/// handle.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_is_in_order(queue: XpuctlQueueRef) -> bool {
    clear_last_error();
    match unsafe { deref_arg(queue, "queue") } {
        Ok(queue) => queue.is_in_order(),
        Err(err) => {
            set_last_error(&err);
            false
        }
    }
}
