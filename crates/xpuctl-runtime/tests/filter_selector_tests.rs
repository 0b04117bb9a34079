//! Selector parsing and resolution semantics over hand-built device
//! lists, independent of the process enumeration.

use std::collections::BTreeSet;

use proptest::option;
use proptest::prelude::*;
use xpuctl_runtime::{Backend, Device, DeviceRecord, DeviceType, FilterSelector};

fn device(backend: Backend, device_type: DeviceType, name: &str) -> Device {
    Device::new(DeviceRecord {
        backend,
        device_type,
        name: name.to_string(),
        vendor: "test".to_string(),
        driver_version: "0.0".to_string(),
        max_compute_units: 4,
        max_work_item_dims: 3,
        max_work_item_sizes: [64, 64, 64],
        max_work_group_size: 64,
        max_num_sub_groups: 4,
        aspects: BTreeSet::new(),
    })
}

/// Enumeration mirroring the default topology shape.
fn enumeration() -> Vec<Device> {
    vec![
        device(Backend::OpenCl, DeviceType::Cpu, "cl-cpu"),
        device(Backend::OpenCl, DeviceType::Gpu, "cl-gpu"),
        device(Backend::OpenCl, DeviceType::Accelerator, "cl-accel"),
        device(Backend::LevelZero, DeviceType::Gpu, "l0-gpu"),
        device(Backend::Host, DeviceType::Host, "host"),
    ]
}

fn selected_name(raw: &str, devices: &[Device]) -> Option<String> {
    FilterSelector::parse(raw)
        .unwrap()
        .select(devices)
        .map(|d| d.name().to_string())
}

// ── resolution ───────────────────────────────────────────────────────

/// A backend-only filter picks the highest-ranked device of that backend.
#[test]
fn backend_filter_prefers_gpu() {
    let devices = enumeration();
    assert_eq!(selected_name("opencl", &devices).as_deref(), Some("cl-gpu"));
    assert_eq!(
        selected_name("level_zero", &devices).as_deref(),
        Some("l0-gpu")
    );
}

/// A device-type filter ignores backend and ranks by enumeration order.
#[test]
fn type_filter_takes_first_match_on_ties() {
    let devices = enumeration();
    assert_eq!(selected_name("gpu", &devices).as_deref(), Some("cl-gpu"));
    assert_eq!(selected_name("cpu", &devices).as_deref(), Some("cl-cpu"));
}

/// An explicit index addresses the filtered list in enumeration order.
#[test]
fn indexed_filters_address_the_filtered_list() {
    let devices = enumeration();
    assert_eq!(selected_name("gpu:0", &devices).as_deref(), Some("cl-gpu"));
    assert_eq!(selected_name("gpu:1", &devices).as_deref(), Some("l0-gpu"));
    assert_eq!(selected_name("gpu:2", &devices), None);
    assert_eq!(
        selected_name("opencl:gpu:0", &devices).as_deref(),
        Some("cl-gpu")
    );
    assert_eq!(selected_name("opencl:gpu:1", &devices), None);
}

/// A lone index addresses the whole enumeration.
#[test]
fn bare_index_addresses_the_enumeration() {
    let devices = enumeration();
    assert_eq!(selected_name("0", &devices).as_deref(), Some("cl-cpu"));
    assert_eq!(selected_name("1", &devices).as_deref(), Some("cl-gpu"));
    assert_eq!(selected_name("4", &devices).as_deref(), Some("host"));
    assert_eq!(selected_name("5", &devices), None);
}

/// Comma-separated filters compete; the best-ranked candidate wins.
#[test]
fn comma_alternatives_compete_on_rank() {
    let devices = enumeration();
    assert_eq!(selected_name("cpu,gpu", &devices).as_deref(), Some("cl-gpu"));
    assert_eq!(
        selected_name("accelerator,cuda", &devices).as_deref(),
        Some("cl-accel")
    );
}

/// Filters that admit nothing resolve to nothing.
#[test]
fn unmatched_filters_resolve_to_none() {
    let devices = enumeration();
    assert_eq!(selected_name("cuda", &devices), None);
    assert_eq!(selected_name("level_zero:cpu", &devices), None);
    assert_eq!(selected_name("custom", &devices), None);
}

/// Selection is a pure function of the device list.
#[test]
fn selection_is_deterministic() {
    let devices = enumeration();
    for raw in ["opencl", "gpu", "gpu:1", "1", "cpu,gpu"] {
        assert_eq!(
            selected_name(raw, &devices),
            selected_name(raw, &devices),
            "'{raw}'"
        );
    }
}

// ── parsing properties ───────────────────────────────────────────────

proptest! {
    /// Formatting a filter and reparsing it preserves every component.
    /// The `host` device type is excluded: that token always parses into
    /// the backend slot.
    #[test]
    fn filter_components_round_trip(
        backend in option::of(0usize..Backend::ALL.len()),
        device_type in option::of(0usize..DeviceType::ALL.len() - 1),
        index in option::of(0usize..128),
    ) {
        prop_assume!(backend.is_some() || device_type.is_some() || index.is_some());

        let mut parts: Vec<String> = Vec::new();
        if let Some(b) = backend {
            parts.push(Backend::ALL[b].token().to_string());
        }
        if let Some(t) = device_type {
            parts.push(DeviceType::ALL[t].token().to_string());
        }
        if let Some(i) = index {
            parts.push(i.to_string());
        }
        let raw = parts.join(":");

        let selector = FilterSelector::parse(&raw).unwrap();
        prop_assert_eq!(selector.filters().len(), 1);
        let filter = selector.filters()[0];
        prop_assert_eq!(filter.backend, backend.map(|b| Backend::ALL[b]));
        prop_assert_eq!(filter.device_type, device_type.map(|t| DeviceType::ALL[t]));
        prop_assert_eq!(filter.index, index);
    }

    /// Garbage that contains no valid token never parses.
    #[test]
    fn garbage_tokens_never_parse(token in "[a-z]{3,10}") {
        prop_assume!(Backend::ALL.iter().all(|b| b.token() != token));
        prop_assume!(DeviceType::ALL.iter().all(|t| t.token() != token));
        prop_assert!(FilterSelector::parse(&token).is_err());
    }
}
