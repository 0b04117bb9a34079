//! Capability aspects.
//!
//! An aspect is a boolean capability flag a device either has or does not
//! have. The set is fixed; the C facade numbers its mirror enum in the
//! order of [`Aspect::ALL`].

use std::fmt;

/// Boolean capability flag of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Aspect {
    Cpu,
    Gpu,
    Accelerator,
    Custom,
    Emulated,
    HostDebuggable,
    Fp16,
    Fp64,
    Atomic64,
    Int64BaseAtomics,
    Int64ExtendedAtomics,
    Image,
    OnlineCompiler,
    OnlineLinker,
    QueueProfiling,
    UsmDeviceAllocations,
    UsmHostAllocations,
    UsmAtomicHostAllocations,
    UsmSharedAllocations,
    UsmAtomicSharedAllocations,
    UsmSystemAllocations,
}

impl Aspect {
    /// Every aspect, in facade numbering order.
    pub const ALL: [Aspect; 21] = [
        Aspect::Cpu,
        Aspect::Gpu,
        Aspect::Accelerator,
        Aspect::Custom,
        Aspect::Emulated,
        Aspect::HostDebuggable,
        Aspect::Fp16,
        Aspect::Fp64,
        Aspect::Atomic64,
        Aspect::Int64BaseAtomics,
        Aspect::Int64ExtendedAtomics,
        Aspect::Image,
        Aspect::OnlineCompiler,
        Aspect::OnlineLinker,
        Aspect::QueueProfiling,
        Aspect::UsmDeviceAllocations,
        Aspect::UsmHostAllocations,
        Aspect::UsmAtomicHostAllocations,
        Aspect::UsmSharedAllocations,
        Aspect::UsmAtomicSharedAllocations,
        Aspect::UsmSystemAllocations,
    ];

    /// Lowercase name, stable across releases.
    pub fn name(self) -> &'static str {
        match self {
            Aspect::Cpu => "cpu",
            Aspect::Gpu => "gpu",
            Aspect::Accelerator => "accelerator",
            Aspect::Custom => "custom",
            Aspect::Emulated => "emulated",
            Aspect::HostDebuggable => "host_debuggable",
            Aspect::Fp16 => "fp16",
            Aspect::Fp64 => "fp64",
            Aspect::Atomic64 => "atomic64",
            Aspect::Int64BaseAtomics => "int64_base_atomics",
            Aspect::Int64ExtendedAtomics => "int64_extended_atomics",
            Aspect::Image => "image",
            Aspect::OnlineCompiler => "online_compiler",
            Aspect::OnlineLinker => "online_linker",
            Aspect::QueueProfiling => "queue_profiling",
            Aspect::UsmDeviceAllocations => "usm_device_allocations",
            Aspect::UsmHostAllocations => "usm_host_allocations",
            Aspect::UsmAtomicHostAllocations => "usm_atomic_host_allocations",
            Aspect::UsmSharedAllocations => "usm_shared_allocations",
            Aspect::UsmAtomicSharedAllocations => "usm_atomic_shared_allocations",
            Aspect::UsmSystemAllocations => "usm_system_allocations",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
