//! Platform records.

use std::fmt;
use std::sync::Arc;

use crate::backend::Backend;

/// Immutable property record backing a [`Platform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRecord {
    pub backend: Backend,
    pub name: String,
    pub vendor: String,
    pub version: String,
}

/// Cheap clonable handle to one enumerated platform.
#[derive(Debug, Clone)]
pub struct Platform {
    record: Arc<PlatformRecord>,
}

impl Platform {
    pub fn new(record: PlatformRecord) -> Platform {
        Platform {
            record: Arc::new(record),
        }
    }

    pub fn backend(&self) -> Backend {
        self.record.backend
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn vendor(&self) -> &str {
        &self.record.vendor
    }

    pub fn version(&self) -> &str {
        &self.record.version
    }

    pub fn record(&self) -> &PlatformRecord {
        &self.record
    }
}

impl PartialEq for Platform {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.record, &other.record) || self.record == other.record
    }
}

impl Eq for Platform {}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.record.name, self.record.backend)
    }
}
