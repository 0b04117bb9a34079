//! Queue-manager entry points: enumeration, cached queue lookup, and the
//! per-thread activation stack.

use std::os::raw::c_int;

use xpuctl_runtime::{Backend, DeviceType, QueueManager};

use crate::enums::{XpuctlBackend, XpuctlDeviceType};
use crate::error::{clear_last_error, set_last_error, XpuctlCError, XPUCTL_SUCCESS};
use crate::queue_interface::XpuctlQueueRef;

fn decode_pair(
    backend: XpuctlBackend,
    device_type: XpuctlDeviceType,
) -> Result<(Backend, DeviceType), XpuctlCError> {
    Ok((backend.try_into()?, device_type.try_into()?))
}

/// Number of queues available for this backend and device type. Zero
/// when none exist or the enums are out of range.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_mgr_num_queues(
    backend: XpuctlBackend,
    device_type: XpuctlDeviceType,
) -> usize {
    clear_last_error();
    match decode_pair(backend, device_type) {
        Ok((backend, device_type)) => QueueManager::global().num_queues(backend, device_type),
        Err(err) => {
            set_last_error(&err);
            0
        }
    }
}

/// Queue bound to the index-th device matching `backend` and
/// `device_type`. Caller releases with [`xpuctl_queue_free`]; repeated
/// calls for the same slot share one underlying queue.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_mgr_queue(
    backend: XpuctlBackend,
    device_type: XpuctlDeviceType,
    index: usize,
) -> XpuctlQueueRef {
    clear_last_error();
    let result = decode_pair(backend, device_type)
        .and_then(|(backend, device_type)| {
            QueueManager::global()
                .queue(backend, device_type, index)
                .map_err(XpuctlCError::from)
        });
    match result {
        Ok(queue) => Box::into_raw(Box::new(queue)),
        Err(err) => {
            set_last_error(&err);
            std::ptr::null_mut()
        }
    }
}

/// The calling thread's current queue: the most recently pushed queue,
/// else the process default queue. Caller releases with
/// [`xpuctl_queue_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_mgr_current_queue() -> XpuctlQueueRef {
    clear_last_error();
    Box::into_raw(Box::new(QueueManager::global().current_queue()))
}

/// Activate a queue for the calling thread. Returns `XPUCTL_SUCCESS` or
/// a negative status code.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_mgr_push_queue(
    backend: XpuctlBackend,
    device_type: XpuctlDeviceType,
    index: usize,
) -> c_int {
    clear_last_error();
    let result = decode_pair(backend, device_type)
        .and_then(|(backend, device_type)| {
            QueueManager::global()
                .push_queue(backend, device_type, index)
                .map_err(XpuctlCError::from)
        });
    match result {
        Ok(_) => XPUCTL_SUCCESS,
        Err(err) => {
            set_last_error(&err);
            err.code()
        }
    }
}

/// Deactivate the calling thread's most recently pushed queue. Returns
/// `XPUCTL_SUCCESS` or a negative status code.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_mgr_pop_queue() -> c_int {
    clear_last_error();
    match QueueManager::global().pop_queue() {
        Ok(_) => XPUCTL_SUCCESS,
        Err(err) => {
            let err = XpuctlCError::from(err);
            set_last_error(&err);
            err.code()
        }
    }
}

/// Depth of the calling thread's activation stack.
#[unsafe(no_mangle)]
pub extern "C" fn xpuctl_queue_mgr_num_activated_queues() -> usize {
    QueueManager::global().num_activated_queues()
}
