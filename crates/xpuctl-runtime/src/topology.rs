//! Emulated-device topology configuration.
//!
//! The registry materializes one emulated device per topology entry, on
//! top of the always-present host device. `XPUCTL_DEVICES` overrides the
//! built-in default with a comma-separated list of `backend:device_type`
//! pairs (`none` for an empty topology); `XPUCTL_STRICT_MODE` disables
//! emulated devices entirely. Both variables are read once, when the
//! registry is first touched.

use tracing::warn;

use crate::backend::Backend;
use crate::device::DeviceType;

/// Environment variable overriding the emulated topology.
pub const DEVICES_ENV: &str = "XPUCTL_DEVICES";

/// Environment variable disabling emulated devices.
pub const STRICT_MODE_ENV: &str = "XPUCTL_STRICT_MODE";

/// Topology used when no override is present.
pub const DEFAULT_TOPOLOGY: [(Backend, DeviceType); 4] = [
    (Backend::OpenCl, DeviceType::Cpu),
    (Backend::OpenCl, DeviceType::Gpu),
    (Backend::OpenCl, DeviceType::Accelerator),
    (Backend::LevelZero, DeviceType::Gpu),
];

/// Parse a topology override string.
///
/// Malformed entries are skipped with a warning rather than failing the
/// whole enumeration.
pub fn parse_topology(raw: &str) -> Vec<(Backend, DeviceType)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    let mut pairs = Vec::new();
    for entry in trimmed.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let mut parts = entry.splitn(2, ':');
        let backend = parts.next().map(str::trim).and_then(Backend::parse_token);
        let device_type = parts
            .next()
            .map(str::trim)
            .and_then(DeviceType::parse_token);
        match (backend, device_type) {
            (Some(backend), Some(device_type)) => pairs.push((backend, device_type)),
            _ => warn!("ignoring malformed topology entry '{entry}'"),
        }
    }
    pairs
}

/// Whether emulated devices are disabled for this process.
pub fn strict_mode() -> bool {
    std::env::var(STRICT_MODE_ENV)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Topology for this process, honoring the override and strict mode.
pub fn configured_topology() -> Vec<(Backend, DeviceType)> {
    if strict_mode() {
        return Vec::new();
    }
    match std::env::var(DEVICES_ENV) {
        Ok(raw) => parse_topology(&raw),
        Err(_) => DEFAULT_TOPOLOGY.to_vec(),
    }
}
