//! Process-wide device enumeration.
//!
//! Built once on first touch and immutable afterwards, so two queries in
//! the same process always see the same devices in the same order.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use tracing::debug;

use crate::aspect::Aspect;
use crate::backend::Backend;
use crate::device::{Device, DeviceRecord, DeviceType};
use crate::platform::{Platform, PlatformRecord};
use crate::topology;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The device and platform enumeration of this process.
pub struct Registry {
    devices: Vec<Device>,
    platforms: Vec<Platform>,
    host: Device,
}

impl Registry {
    /// Global enumeration, built on first use.
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(Registry::build)
    }

    fn build() -> Registry {
        let topology = topology::configured_topology();
        let host = host_device();
        let mut devices: Vec<Device> = topology
            .iter()
            .map(|&(backend, device_type)| emulated_device(backend, device_type))
            .collect();
        devices.push(host.clone());

        let mut seen = BTreeSet::new();
        let mut platforms = Vec::new();
        for device in &devices {
            if seen.insert(device.backend()) {
                platforms.push(Platform::new(platform_record(device.backend())));
            }
        }

        debug!(
            "enumerated {} device(s) across {} platform(s)",
            devices.len(),
            platforms.len()
        );
        Registry {
            devices,
            platforms,
            host,
        }
    }

    /// Devices in enumeration order. Never empty; the host device is last.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Platforms in enumeration order, one per backend present.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Platform for `backend`, when any device of that backend exists.
    pub fn platform(&self, backend: Backend) -> Option<Platform> {
        self.platforms
            .iter()
            .find(|p| p.backend() == backend)
            .cloned()
    }

    /// Devices matching the given backend and device-type filters, in
    /// enumeration order. `None` matches anything.
    pub fn devices_matching(
        &self,
        backend: Option<Backend>,
        device_type: Option<DeviceType>,
    ) -> Vec<Device> {
        self.devices
            .iter()
            .filter(|d| {
                backend.map_or(true, |b| d.backend() == b)
                    && device_type.map_or(true, |t| d.device_type() == t)
            })
            .cloned()
            .collect()
    }

    /// Device the default selection policy picks for this process.
    pub fn default_device(&self) -> Device {
        self.devices
            .iter()
            .min_by_key(|device| std::cmp::Reverse(device.selection_score()))
            .cloned()
            .unwrap_or_else(|| self.host.clone())
    }

    /// The always-present host device.
    pub fn host_device(&self) -> &Device {
        &self.host
    }
}

/// Logical core count of the host, never below one.
fn logical_cores() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

fn backend_label(backend: Backend) -> &'static str {
    match backend {
        Backend::OpenCl => "OpenCL",
        Backend::LevelZero => "Level Zero",
        Backend::Cuda => "CUDA",
        Backend::Host => "Host",
    }
}

fn type_label(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Cpu => "CPU",
        DeviceType::Gpu => "GPU",
        DeviceType::Accelerator => "Accelerator",
        DeviceType::Custom => "Custom Device",
        DeviceType::Host => "Host Device",
    }
}

fn host_device() -> Device {
    let cores = logical_cores();
    Device::new(DeviceRecord {
        backend: Backend::Host,
        device_type: DeviceType::Host,
        name: "xpuctl Host Device".to_string(),
        vendor: "xpuctl project".to_string(),
        driver_version: env!("CARGO_PKG_VERSION").to_string(),
        max_compute_units: cores,
        max_work_item_dims: 3,
        max_work_item_sizes: [8192, 8192, 8192],
        max_work_group_size: 8192,
        max_num_sub_groups: 4,
        aspects: BTreeSet::from([
            Aspect::Fp64,
            Aspect::Atomic64,
            Aspect::Int64BaseAtomics,
            Aspect::Int64ExtendedAtomics,
            Aspect::QueueProfiling,
            Aspect::HostDebuggable,
            Aspect::UsmDeviceAllocations,
            Aspect::UsmHostAllocations,
            Aspect::UsmAtomicHostAllocations,
            Aspect::UsmSharedAllocations,
            Aspect::UsmAtomicSharedAllocations,
            Aspect::UsmSystemAllocations,
        ]),
    })
}

fn emulated_device(backend: Backend, device_type: DeviceType) -> Device {
    let (max_compute_units, max_work_item_sizes, max_work_group_size, max_num_sub_groups) =
        match device_type {
            DeviceType::Cpu => (logical_cores(), [8192, 8192, 8192], 8192, 8),
            DeviceType::Gpu => (32, [1024, 1024, 64], 1024, 32),
            // Emulated accelerators report no sub-group support.
            DeviceType::Accelerator => (16, [256, 256, 256], 256, 0),
            DeviceType::Custom => (4, [64, 64, 64], 64, 1),
            DeviceType::Host => (logical_cores(), [8192, 8192, 8192], 8192, 4),
        };
    Device::new(DeviceRecord {
        backend,
        device_type,
        name: format!(
            "Emulated {} {}",
            backend_label(backend),
            type_label(device_type)
        ),
        vendor: "xpuctl project".to_string(),
        driver_version: concat!(env!("CARGO_PKG_VERSION"), "-emulated").to_string(),
        max_compute_units,
        max_work_item_dims: 3,
        max_work_item_sizes,
        max_work_group_size,
        max_num_sub_groups,
        aspects: emulated_aspects(backend, device_type),
    })
}

fn emulated_aspects(backend: Backend, device_type: DeviceType) -> BTreeSet<Aspect> {
    let mut aspects = BTreeSet::from([
        Aspect::Emulated,
        Aspect::Atomic64,
        Aspect::Int64BaseAtomics,
        Aspect::Int64ExtendedAtomics,
        Aspect::QueueProfiling,
    ]);
    if let Some(implied) = device_type.implied_aspect() {
        aspects.insert(implied);
    }
    match device_type {
        DeviceType::Cpu => {
            aspects.extend([
                Aspect::Fp64,
                Aspect::OnlineCompiler,
                Aspect::OnlineLinker,
                Aspect::UsmDeviceAllocations,
                Aspect::UsmHostAllocations,
                Aspect::UsmAtomicHostAllocations,
                Aspect::UsmSharedAllocations,
                Aspect::UsmAtomicSharedAllocations,
                Aspect::UsmSystemAllocations,
            ]);
        }
        DeviceType::Gpu => {
            aspects.extend([
                Aspect::Fp16,
                Aspect::UsmDeviceAllocations,
                Aspect::UsmSharedAllocations,
            ]);
            if backend == Backend::OpenCl {
                aspects.extend([
                    Aspect::Fp64,
                    Aspect::Image,
                    Aspect::OnlineCompiler,
                    Aspect::OnlineLinker,
                ]);
            }
            if backend == Backend::LevelZero {
                aspects.insert(Aspect::UsmHostAllocations);
            }
        }
        DeviceType::Accelerator => {
            aspects.extend([Aspect::Fp64, Aspect::UsmDeviceAllocations]);
        }
        DeviceType::Custom | DeviceType::Host => {}
    }
    aspects
}

fn platform_record(backend: Backend) -> PlatformRecord {
    let (name, version) = match backend {
        Backend::OpenCl => ("xpuctl OpenCL Platform", "OpenCL 3.0"),
        Backend::LevelZero => ("xpuctl Level Zero Platform", "1.3"),
        Backend::Cuda => ("xpuctl CUDA Platform", "12.0"),
        Backend::Host => ("xpuctl Host Platform", env!("CARGO_PKG_VERSION")),
    };
    PlatformRecord {
        backend,
        name: name.to_string(),
        vendor: "xpuctl project".to_string(),
        version: version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emulated_devices_report_their_type_aspect() {
        for device_type in [DeviceType::Cpu, DeviceType::Gpu, DeviceType::Accelerator] {
            let device = emulated_device(Backend::OpenCl, device_type);
            let implied = device_type.implied_aspect();
            assert!(implied.is_some_and(|aspect| device.has(aspect)), "{device_type}");
            assert!(device.has(Aspect::Emulated), "{device_type}");
        }
    }

    #[test]
    fn host_device_is_not_emulated() {
        let host = host_device();
        assert!(!host.has(Aspect::Emulated));
        assert!(host.has(Aspect::HostDebuggable));
        assert!(host.max_compute_units() >= 1);
    }
}
