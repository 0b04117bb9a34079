//! C-side enums mirrored onto the native model.
//!
//! Discriminants are part of the ABI and never change. `Unknown`, `All`,
//! and `Automatic` exist only on this side of the boundary; converting
//! them to a native value is an error.

use std::os::raw::c_int;

use xpuctl_runtime::{Aspect, Backend, DeviceType};

use crate::error::XpuctlCError;

/// Backend kinds as seen by C callers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XpuctlBackend {
    Unknown = 0,
    All = 1,
    OpenCl = 2,
    LevelZero = 3,
    Cuda = 4,
    Host = 5,
}

impl XpuctlBackend {
    /// Decode a raw C value.
    pub fn from_raw(value: c_int) -> Option<XpuctlBackend> {
        match value {
            0 => Some(XpuctlBackend::Unknown),
            1 => Some(XpuctlBackend::All),
            2 => Some(XpuctlBackend::OpenCl),
            3 => Some(XpuctlBackend::LevelZero),
            4 => Some(XpuctlBackend::Cuda),
            5 => Some(XpuctlBackend::Host),
            _ => None,
        }
    }
}

impl From<Backend> for XpuctlBackend {
    fn from(backend: Backend) -> XpuctlBackend {
        match backend {
            Backend::OpenCl => XpuctlBackend::OpenCl,
            Backend::LevelZero => XpuctlBackend::LevelZero,
            Backend::Cuda => XpuctlBackend::Cuda,
            Backend::Host => XpuctlBackend::Host,
            _ => XpuctlBackend::Unknown,
        }
    }
}

impl TryFrom<XpuctlBackend> for Backend {
    type Error = XpuctlCError;

    fn try_from(value: XpuctlBackend) -> Result<Backend, XpuctlCError> {
        match value {
            XpuctlBackend::OpenCl => Ok(Backend::OpenCl),
            XpuctlBackend::LevelZero => Ok(Backend::LevelZero),
            XpuctlBackend::Cuda => Ok(Backend::Cuda),
            XpuctlBackend::Host => Ok(Backend::Host),
            other => Err(XpuctlCError::InvalidEnum {
                kind: "backend",
                value: other as i32,
            }),
        }
    }
}

/// Device types as seen by C callers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XpuctlDeviceType {
    Unknown = 0,
    All = 1,
    Automatic = 2,
    Cpu = 3,
    Gpu = 4,
    Accelerator = 5,
    Custom = 6,
    Host = 7,
}

impl XpuctlDeviceType {
    /// Decode a raw C value.
    pub fn from_raw(value: c_int) -> Option<XpuctlDeviceType> {
        match value {
            0 => Some(XpuctlDeviceType::Unknown),
            1 => Some(XpuctlDeviceType::All),
            2 => Some(XpuctlDeviceType::Automatic),
            3 => Some(XpuctlDeviceType::Cpu),
            4 => Some(XpuctlDeviceType::Gpu),
            5 => Some(XpuctlDeviceType::Accelerator),
            6 => Some(XpuctlDeviceType::Custom),
            7 => Some(XpuctlDeviceType::Host),
            _ => None,
        }
    }
}

impl From<DeviceType> for XpuctlDeviceType {
    fn from(device_type: DeviceType) -> XpuctlDeviceType {
        match device_type {
            DeviceType::Cpu => XpuctlDeviceType::Cpu,
            DeviceType::Gpu => XpuctlDeviceType::Gpu,
            DeviceType::Accelerator => XpuctlDeviceType::Accelerator,
            DeviceType::Custom => XpuctlDeviceType::Custom,
            DeviceType::Host => XpuctlDeviceType::Host,
            _ => XpuctlDeviceType::Unknown,
        }
    }
}

impl TryFrom<XpuctlDeviceType> for DeviceType {
    type Error = XpuctlCError;

    fn try_from(value: XpuctlDeviceType) -> Result<DeviceType, XpuctlCError> {
        match value {
            XpuctlDeviceType::Cpu => Ok(DeviceType::Cpu),
            XpuctlDeviceType::Gpu => Ok(DeviceType::Gpu),
            XpuctlDeviceType::Accelerator => Ok(DeviceType::Accelerator),
            XpuctlDeviceType::Custom => Ok(DeviceType::Custom),
            XpuctlDeviceType::Host => Ok(DeviceType::Host),
            other => Err(XpuctlCError::InvalidEnum {
                kind: "device type",
                value: other as i32,
            }),
        }
    }
}

/// Aspects as seen by C callers, numbered in [`Aspect::ALL`] order.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XpuctlAspect {
    Cpu = 0,
    Gpu = 1,
    Accelerator = 2,
    Custom = 3,
    Emulated = 4,
    HostDebuggable = 5,
    Fp16 = 6,
    Fp64 = 7,
    Atomic64 = 8,
    Int64BaseAtomics = 9,
    Int64ExtendedAtomics = 10,
    Image = 11,
    OnlineCompiler = 12,
    OnlineLinker = 13,
    QueueProfiling = 14,
    UsmDeviceAllocations = 15,
    UsmHostAllocations = 16,
    UsmAtomicHostAllocations = 17,
    UsmSharedAllocations = 18,
    UsmAtomicSharedAllocations = 19,
    UsmSystemAllocations = 20,
}

impl XpuctlAspect {
    /// Decode a raw C value.
    pub fn from_raw(value: c_int) -> Option<XpuctlAspect> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Aspect::ALL.get(index).copied())
            .map(XpuctlAspect::from)
    }
}

impl From<Aspect> for XpuctlAspect {
    fn from(aspect: Aspect) -> XpuctlAspect {
        match aspect {
            Aspect::Cpu => XpuctlAspect::Cpu,
            Aspect::Gpu => XpuctlAspect::Gpu,
            Aspect::Accelerator => XpuctlAspect::Accelerator,
            Aspect::Custom => XpuctlAspect::Custom,
            Aspect::Emulated => XpuctlAspect::Emulated,
            Aspect::HostDebuggable => XpuctlAspect::HostDebuggable,
            Aspect::Fp16 => XpuctlAspect::Fp16,
            Aspect::Fp64 => XpuctlAspect::Fp64,
            Aspect::Atomic64 => XpuctlAspect::Atomic64,
            Aspect::Int64BaseAtomics => XpuctlAspect::Int64BaseAtomics,
            Aspect::Int64ExtendedAtomics => XpuctlAspect::Int64ExtendedAtomics,
            Aspect::Image => XpuctlAspect::Image,
            Aspect::OnlineCompiler => XpuctlAspect::OnlineCompiler,
            Aspect::OnlineLinker => XpuctlAspect::OnlineLinker,
            Aspect::QueueProfiling => XpuctlAspect::QueueProfiling,
            Aspect::UsmDeviceAllocations => XpuctlAspect::UsmDeviceAllocations,
            Aspect::UsmHostAllocations => XpuctlAspect::UsmHostAllocations,
            Aspect::UsmAtomicHostAllocations => XpuctlAspect::UsmAtomicHostAllocations,
            Aspect::UsmSharedAllocations => XpuctlAspect::UsmSharedAllocations,
            Aspect::UsmAtomicSharedAllocations => XpuctlAspect::UsmAtomicSharedAllocations,
            Aspect::UsmSystemAllocations => XpuctlAspect::UsmSystemAllocations,
        }
    }
}

impl From<XpuctlAspect> for Aspect {
    fn from(aspect: XpuctlAspect) -> Aspect {
        match aspect {
            XpuctlAspect::Cpu => Aspect::Cpu,
            XpuctlAspect::Gpu => Aspect::Gpu,
            XpuctlAspect::Accelerator => Aspect::Accelerator,
            XpuctlAspect::Custom => Aspect::Custom,
            XpuctlAspect::Emulated => Aspect::Emulated,
            XpuctlAspect::HostDebuggable => Aspect::HostDebuggable,
            XpuctlAspect::Fp16 => Aspect::Fp16,
            XpuctlAspect::Fp64 => Aspect::Fp64,
            XpuctlAspect::Atomic64 => Aspect::Atomic64,
            XpuctlAspect::Int64BaseAtomics => Aspect::Int64BaseAtomics,
            XpuctlAspect::Int64ExtendedAtomics => Aspect::Int64ExtendedAtomics,
            XpuctlAspect::Image => Aspect::Image,
            XpuctlAspect::OnlineCompiler => Aspect::OnlineCompiler,
            XpuctlAspect::OnlineLinker => Aspect::OnlineLinker,
            XpuctlAspect::QueueProfiling => Aspect::QueueProfiling,
            XpuctlAspect::UsmDeviceAllocations => Aspect::UsmDeviceAllocations,
            XpuctlAspect::UsmHostAllocations => Aspect::UsmHostAllocations,
            XpuctlAspect::UsmAtomicHostAllocations => Aspect::UsmAtomicHostAllocations,
            XpuctlAspect::UsmSharedAllocations => Aspect::UsmSharedAllocations,
            XpuctlAspect::UsmAtomicSharedAllocations => Aspect::UsmAtomicSharedAllocations,
            XpuctlAspect::UsmSystemAllocations => Aspect::UsmSystemAllocations,
        }
    }
}
