//! Queues and the process queue manager.
//!
//! The manager hands out cached, reference-counted queues keyed by
//! backend, device type, and index into the matching device list. Each
//! thread also carries an activation stack; its top is that thread's
//! current queue, falling back to the process default queue.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use crate::backend::Backend;
use crate::device::{Device, DeviceType};
use crate::error::{Result, RuntimeError};
use crate::registry::Registry;

/// Property record behind a [`Queue`].
#[derive(Debug)]
pub struct QueueRecord {
    pub device: Device,
    pub in_order: bool,
    pub profiling: bool,
}

/// Reference-counted queue bound to one device.
#[derive(Debug, Clone)]
pub struct Queue {
    record: Arc<QueueRecord>,
}

impl Queue {
    /// Out-of-order queue with default properties.
    pub fn new(device: Device) -> Queue {
        Queue::with_properties(device, false, false)
    }

    /// Queue with explicit ordering and profiling properties.
    pub fn with_properties(device: Device, in_order: bool, profiling: bool) -> Queue {
        Queue {
            record: Arc::new(QueueRecord {
                device,
                in_order,
                profiling,
            }),
        }
    }

    pub fn device(&self) -> &Device {
        &self.record.device
    }

    pub fn backend(&self) -> Backend {
        self.record.device.backend()
    }

    pub fn is_in_order(&self) -> bool {
        self.record.in_order
    }

    pub fn has_profiling(&self) -> bool {
        self.record.profiling
    }

    /// Whether two handles name the same underlying queue.
    pub fn same_queue(&self, other: &Queue) -> bool {
        Arc::ptr_eq(&self.record, &other.record)
    }
}

static MANAGER: OnceLock<QueueManager> = OnceLock::new();

thread_local! {
    static ACTIVATION_STACK: RefCell<Vec<Queue>> = const { RefCell::new(Vec::new()) };
}

/// Hands out queues per backend/device-type pair and tracks per-thread
/// queue activation.
pub struct QueueManager {
    cache: Mutex<HashMap<(Backend, DeviceType, usize), Queue>>,
    default_queue: Queue,
}

impl QueueManager {
    /// Global manager, built on first use.
    pub fn global() -> &'static QueueManager {
        MANAGER.get_or_init(|| {
            let device = Registry::global().default_device();
            debug!("default queue bound to {}", device.summary());
            QueueManager {
                cache: Mutex::new(HashMap::new()),
                default_queue: Queue::new(device),
            }
        })
    }

    /// Number of queues available for this backend and device type.
    pub fn num_queues(&self, backend: Backend, device_type: DeviceType) -> usize {
        Registry::global()
            .devices_matching(Some(backend), Some(device_type))
            .len()
    }

    /// Cached queue for the index-th device matching `backend` and
    /// `device_type`, in enumeration order.
    pub fn queue(&self, backend: Backend, device_type: DeviceType, index: usize) -> Result<Queue> {
        let matching = Registry::global().devices_matching(Some(backend), Some(device_type));
        let device = matching
            .get(index)
            .cloned()
            .ok_or(RuntimeError::QueueIndexOutOfRange {
                backend,
                device_type,
                index,
                available: matching.len(),
            })?;
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let queue = cache
            .entry((backend, device_type, index))
            .or_insert_with(|| {
                debug!("creating queue {index} for {backend}:{device_type}");
                Queue::new(device)
            })
            .clone();
        Ok(queue)
    }

    /// This thread's current queue: top of the activation stack, else the
    /// process default queue.
    pub fn current_queue(&self) -> Queue {
        ACTIVATION_STACK
            .with(|stack| stack.borrow().last().cloned())
            .unwrap_or_else(|| self.default_queue.clone())
    }

    /// Activate a queue for the calling thread and return it.
    pub fn push_queue(
        &self,
        backend: Backend,
        device_type: DeviceType,
        index: usize,
    ) -> Result<Queue> {
        let queue = self.queue(backend, device_type, index)?;
        ACTIVATION_STACK.with(|stack| stack.borrow_mut().push(queue.clone()));
        Ok(queue)
    }

    /// Deactivate the calling thread's most recently pushed queue.
    pub fn pop_queue(&self) -> Result<Queue> {
        ACTIVATION_STACK
            .with(|stack| stack.borrow_mut().pop())
            .ok_or(RuntimeError::EmptyActivationStack)
    }

    /// Depth of the calling thread's activation stack.
    pub fn num_activated_queues(&self) -> usize {
        ACTIVATION_STACK.with(|stack| stack.borrow().len())
    }

    /// The process default queue.
    pub fn default_queue(&self) -> Queue {
        self.default_queue.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn queue_clones_share_the_record() {
        let queue = Queue::new(Registry::global().default_device());
        let clone = queue.clone();
        assert!(queue.same_queue(&clone));
    }

    #[test]
    fn explicit_properties_are_kept() {
        let queue = Queue::with_properties(Registry::global().default_device(), true, true);
        assert!(queue.is_in_order());
        assert!(queue.has_profiling());
    }
}
