//! Device records and the [`Device`] handle type.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::aspect::Aspect;
use crate::backend::Backend;
use crate::error::RuntimeError;

/// Classification of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum DeviceType {
    Cpu,
    Gpu,
    Accelerator,
    Custom,
    Host,
}

impl DeviceType {
    /// Every device type the runtime can report.
    pub const ALL: [DeviceType; 5] = [
        DeviceType::Cpu,
        DeviceType::Gpu,
        DeviceType::Accelerator,
        DeviceType::Custom,
        DeviceType::Host,
    ];

    /// Canonical lowercase token, as spelled in filter strings.
    pub fn token(self) -> &'static str {
        match self {
            DeviceType::Cpu => "cpu",
            DeviceType::Gpu => "gpu",
            DeviceType::Accelerator => "accelerator",
            DeviceType::Custom => "custom",
            DeviceType::Host => "host",
        }
    }

    pub(crate) fn parse_token(token: &str) -> Option<DeviceType> {
        DeviceType::ALL.iter().copied().find(|t| t.token() == token)
    }

    /// Aspect implied by this device type, if any.
    pub fn implied_aspect(self) -> Option<Aspect> {
        match self {
            DeviceType::Cpu => Some(Aspect::Cpu),
            DeviceType::Gpu => Some(Aspect::Gpu),
            DeviceType::Accelerator => Some(Aspect::Accelerator),
            DeviceType::Custom => Some(Aspect::Custom),
            DeviceType::Host => None,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DeviceType {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceType::parse_token(s).ok_or_else(|| RuntimeError::InvalidFilter {
            filter: s.to_string(),
            reason: "unknown device type".to_string(),
        })
    }
}

/// Immutable property record backing a [`Device`].
///
/// Records are built once by the enumeration and never mutated. Work-item
/// geometry always has three dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub backend: Backend,
    pub device_type: DeviceType,
    pub name: String,
    pub vendor: String,
    pub driver_version: String,
    pub max_compute_units: u32,
    pub max_work_item_dims: u32,
    pub max_work_item_sizes: [usize; 3],
    pub max_work_group_size: usize,
    pub max_num_sub_groups: u32,
    pub aspects: BTreeSet<Aspect>,
}

/// Cheap clonable handle to one enumerated device.
///
/// Clones share the underlying record; equality compares the record, so
/// two handles to the same enumeration entry compare equal.
#[derive(Debug, Clone)]
pub struct Device {
    record: Arc<DeviceRecord>,
}

impl Device {
    pub fn new(record: DeviceRecord) -> Device {
        Device {
            record: Arc::new(record),
        }
    }

    pub fn backend(&self) -> Backend {
        self.record.backend
    }

    pub fn device_type(&self) -> DeviceType {
        self.record.device_type
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn vendor(&self) -> &str {
        &self.record.vendor
    }

    pub fn driver_version(&self) -> &str {
        &self.record.driver_version
    }

    pub fn max_compute_units(&self) -> u32 {
        self.record.max_compute_units
    }

    pub fn max_work_item_dims(&self) -> u32 {
        self.record.max_work_item_dims
    }

    pub fn max_work_item_sizes(&self) -> [usize; 3] {
        self.record.max_work_item_sizes
    }

    pub fn max_work_group_size(&self) -> usize {
        self.record.max_work_group_size
    }

    pub fn max_num_sub_groups(&self) -> u32 {
        self.record.max_num_sub_groups
    }

    /// Whether the device reports `aspect`.
    pub fn has(&self, aspect: Aspect) -> bool {
        self.record.aspects.contains(&aspect)
    }

    pub fn is_cpu(&self) -> bool {
        self.record.device_type == DeviceType::Cpu
    }

    pub fn is_gpu(&self) -> bool {
        self.record.device_type == DeviceType::Gpu
    }

    pub fn is_accelerator(&self) -> bool {
        self.record.device_type == DeviceType::Accelerator
    }

    pub fn is_host(&self) -> bool {
        self.record.device_type == DeviceType::Host
    }

    /// Rank used when a selector names no explicit index. Higher wins.
    pub fn selection_score(&self) -> u32 {
        match self.record.device_type {
            DeviceType::Gpu => 500,
            DeviceType::Cpu => 300,
            DeviceType::Host => 100,
            DeviceType::Accelerator => 75,
            DeviceType::Custom => 50,
        }
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        format!(
            "{}:{} '{}' ({} CUs)",
            self.record.backend,
            self.record.device_type,
            self.record.name,
            self.record.max_compute_units
        )
    }

    pub fn record(&self) -> &DeviceRecord {
        &self.record
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.record, &other.record) || self.record == other.record
    }
}

impl Eq for Device {}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(device_type: DeviceType) -> DeviceRecord {
        DeviceRecord {
            backend: Backend::OpenCl,
            device_type,
            name: "test".to_string(),
            vendor: "test".to_string(),
            driver_version: "0.0".to_string(),
            max_compute_units: 1,
            max_work_item_dims: 3,
            max_work_item_sizes: [1, 1, 1],
            max_work_group_size: 1,
            max_num_sub_groups: 1,
            aspects: BTreeSet::new(),
        }
    }

    #[test]
    fn gpu_outranks_everything_else() {
        let gpu = Device::new(record(DeviceType::Gpu));
        for other in [
            DeviceType::Cpu,
            DeviceType::Accelerator,
            DeviceType::Custom,
            DeviceType::Host,
        ] {
            let device = Device::new(record(other));
            assert!(gpu.selection_score() > device.selection_score(), "{other}");
        }
    }

    #[test]
    fn clones_compare_equal() {
        let device = Device::new(record(DeviceType::Cpu));
        assert_eq!(device, device.clone());
    }
}
