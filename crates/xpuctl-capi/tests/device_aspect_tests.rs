//! Aspect queries cross-checked against the native aspect sets.
//!
//! Devices come from the queue manager, the same way the dispatch layer
//! hands them to callers. Each harness covers one backend/device-type
//! pair and skips when that kind is absent from the enumeration.

use xpuctl_capi::{
    xpuctl_device_free, xpuctl_device_has_aspect, xpuctl_queue_device, xpuctl_queue_free,
    xpuctl_queue_mgr_num_queues, xpuctl_queue_mgr_queue, XpuctlAspect, XpuctlBackend,
    XpuctlDeviceRef, XpuctlDeviceType,
};
use xpuctl_runtime::Aspect;

// ── fixture ──────────────────────────────────────────────────────────

/// Aspects the cross-check loop leaves out.
const EXCLUDED: [Aspect; 8] = [
    Aspect::Emulated,
    Aspect::Image,
    Aspect::UsmDeviceAllocations,
    Aspect::UsmHostAllocations,
    Aspect::UsmAtomicHostAllocations,
    Aspect::UsmSharedAllocations,
    Aspect::UsmAtomicSharedAllocations,
    Aspect::UsmSystemAllocations,
];

/// Device of this kind via the queue manager, or None when absent.
fn device_via_queue_manager(
    backend: XpuctlBackend,
    device_type: XpuctlDeviceType,
) -> Option<XpuctlDeviceRef> {
    if xpuctl_queue_mgr_num_queues(backend, device_type) == 0 {
        return None;
    }
    let qref = xpuctl_queue_mgr_queue(backend, device_type, 0);
    assert!(!qref.is_null(), "{backend:?}:{device_type:?}");
    let dref = xpuctl_queue_device(qref);
    xpuctl_queue_free(qref);
    assert!(!dref.is_null(), "{backend:?}:{device_type:?}");
    Some(dref)
}

/// Facade aspect answers equal the native ones for every checked aspect.
fn check_aspects(dref: XpuctlDeviceRef) {
    let device = unsafe { &*dref };
    for aspect in Aspect::ALL {
        if EXCLUDED.contains(&aspect) {
            continue;
        }
        assert_eq!(
            xpuctl_device_has_aspect(dref, XpuctlAspect::from(aspect)),
            device.has(aspect),
            "aspect {aspect} on {}",
            device.name()
        );
    }
}

// ── harnesses ────────────────────────────────────────────────────────

/// OpenCL CPU device aspect agreement.
#[test]
fn opencl_cpu_aspects() {
    let Some(dref) = device_via_queue_manager(XpuctlBackend::OpenCl, XpuctlDeviceType::Cpu) else {
        return;
    };
    check_aspects(dref);
    xpuctl_device_free(dref);
}

/// OpenCL GPU device aspect agreement.
#[test]
fn opencl_gpu_aspects() {
    let Some(dref) = device_via_queue_manager(XpuctlBackend::OpenCl, XpuctlDeviceType::Gpu) else {
        return;
    };
    check_aspects(dref);
    xpuctl_device_free(dref);
}

/// Level Zero GPU device aspect agreement.
#[test]
fn level_zero_gpu_aspects() {
    let Some(dref) = device_via_queue_manager(XpuctlBackend::LevelZero, XpuctlDeviceType::Gpu)
    else {
        return;
    };
    check_aspects(dref);
    xpuctl_device_free(dref);
}

/// OpenCL accelerator device aspect agreement.
#[test]
fn opencl_accelerator_aspects() {
    let Some(dref) =
        device_via_queue_manager(XpuctlBackend::OpenCl, XpuctlDeviceType::Accelerator)
    else {
        return;
    };
    check_aspects(dref);
    xpuctl_device_free(dref);
}

/// The excluded aspects are still answerable through the facade, and the
/// emulated flag distinguishes emulated entries from the host device.
#[test]
fn excluded_aspects_are_still_answerable() {
    let Some(dref) = device_via_queue_manager(XpuctlBackend::OpenCl, XpuctlDeviceType::Gpu) else {
        return;
    };
    assert!(xpuctl_device_has_aspect(dref, XpuctlAspect::Emulated));
    xpuctl_device_free(dref);

    let Some(host) = device_via_queue_manager(XpuctlBackend::Host, XpuctlDeviceType::Host) else {
        return;
    };
    assert!(!xpuctl_device_has_aspect(host, XpuctlAspect::Emulated));
    xpuctl_device_free(host);
}
