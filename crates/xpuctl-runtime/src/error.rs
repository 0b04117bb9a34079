//! Error types for the runtime object model.

use thiserror::Error;

use crate::backend::Backend;
use crate::device::DeviceType;

/// Errors from selector parsing, device lookup, and the queue manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The filter string could not be parsed.
    #[error("invalid filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// A selector parsed cleanly but matched nothing in this process.
    #[error("no device matched filter '{filter}'")]
    DeviceNotFound { filter: String },

    /// No platform of this backend is present in the enumeration.
    #[error("no platform for backend '{backend}'")]
    PlatformNotFound { backend: Backend },

    /// Queue index past the end of the matching device list.
    #[error(
        "queue index {index} out of range: {available} queue(s) available for {backend}:{device_type}"
    )]
    QueueIndexOutOfRange {
        backend: Backend,
        device_type: DeviceType,
        index: usize,
        available: usize,
    },

    /// Pop was called on a thread with no activated queues.
    #[error("no activated queue on this thread")]
    EmptyActivationStack,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
