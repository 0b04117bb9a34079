//! Native device, platform, and queue model for the xpuctl control layer.
//!
//! The registry enumerates devices once per process: the host device is
//! always present, the CPU entry reflects the probed host, and further
//! devices are emulated from a configurable topology so code paths for
//! OpenCL, Level Zero, and CUDA backends stay exercisable on machines
//! without accelerators. Filter selectors resolve strings such as
//! `"opencl:gpu:0"` against that enumeration, and the queue manager hands
//! out reference-counted queues with a per-thread activation stack.
//!
//! ```
//! use xpuctl_runtime::{FilterSelector, Registry};
//!
//! let selector = FilterSelector::parse("cpu")?;
//! if let Some(device) = selector.select(Registry::global().devices()) {
//!     println!("{}", device.name());
//! }
//! # Ok::<(), xpuctl_runtime::RuntimeError>(())
//! ```

pub mod aspect;
pub mod backend;
pub mod device;
pub mod error;
pub mod platform;
pub mod queue;
pub mod registry;
pub mod selector;
pub mod topology;

pub use aspect::Aspect;
pub use backend::Backend;
pub use device::{Device, DeviceRecord, DeviceType};
pub use error::{Result, RuntimeError};
pub use platform::{Platform, PlatformRecord};
pub use queue::{Queue, QueueManager, QueueRecord};
pub use registry::Registry;
pub use selector::{Filter, FilterSelector};
