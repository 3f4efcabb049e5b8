//! End-to-end tests for the HostAllocates binding.
//!
//! Math results land in the host region and the guest gets their address
//! back; any failure is the null address.

mod common;

use std::f32::consts::FRAC_PI_4;

use glam_bridge_sandbox::FunctionStats;
use glam_bridge_schema::{BoundaryAddress, CodecStrategy, QuatRecord, Vec3Record};

use common::*;

const STRATEGY: CodecStrategy = CodecStrategy::HostAllocates;
const PAGE: usize = 65536;

fn result_address(raw: i32) -> BoundaryAddress {
    BoundaryAddress::from_i32(raw)
}

#[test]
fn test_unit_z_lands_in_host_region() {
    let mut session = session(STRATEGY);
    assert_eq!(session.strategy(), STRATEGY);

    let raw: i32 = session.call("call_unit_z", ()).unwrap();
    let addr = result_address(raw);

    assert!(!addr.is_null());
    // One guest page, then the host region.
    assert!(addr.as_usize() >= PAGE && addr.as_usize() < 2 * PAGE);
    assert_eq!(session.read_record::<Vec3Record>(addr).unwrap(), Vec3Record::UNIT_Z);
}

#[test]
fn test_each_result_gets_its_own_record() {
    let mut session = session(STRATEGY);

    let a = result_address(session.call("call_unit_z", ()).unwrap());
    let b = result_address(session.call("call_unit_z", ()).unwrap());

    assert_ne!(a, b);
    assert_eq!(session.read_record::<Vec3Record>(a).unwrap(), Vec3Record::UNIT_Z);
    assert_eq!(session.read_record::<Vec3Record>(b).unwrap(), Vec3Record::UNIT_Z);
}

#[test]
fn test_normalize_and_rotate() {
    let mut session = session(STRATEGY);
    let v = session.alloc_record(&Vec3Record::new(3.0, 4.0, 0.0)).unwrap();

    let n = result_address(session.call("call_normalize", v.as_i32()).unwrap());
    assert_vec3_near(
        session.read_record(n).unwrap(),
        Vec3Record::new(0.6, 0.8, 0.0),
        1e-6,
    );
    assert_eq!(
        session.read_record::<Vec3Record>(v).unwrap(),
        Vec3Record::new(3.0, 4.0, 0.0)
    );

    let (s, c) = FRAC_PI_4.sin_cos();
    let q = session.alloc_record(&QuatRecord::new(0.0, 0.0, s, c)).unwrap();
    let x = session.alloc_record(&Vec3Record::new(1.0, 0.0, 0.0)).unwrap();
    let r = result_address(session.call("call_mul_vec3", (q.as_i32(), x.as_i32())).unwrap());
    assert_vec3_near(
        session.read_record(r).unwrap(),
        Vec3Record::new(0.0, 1.0, 0.0),
        1e-6,
    );
}

#[test]
fn test_normalize_zero_vector() {
    let mut session = session(STRATEGY);
    let v = session.alloc_record(&Vec3Record::ZERO).unwrap();

    let n = result_address(session.call("call_normalize", v.as_i32()).unwrap());

    assert!(!n.is_null());
    assert_eq!(session.read_record::<Vec3Record>(n).unwrap(), Vec3Record::ZERO);
}

#[test]
fn test_bad_input_returns_null_and_writes_nothing() {
    let mut session = session(STRATEGY);
    let before = session.memory_snapshot();

    let raw: i32 = session.call("call_normalize", 0x7FFF_0000).unwrap();

    assert_eq!(raw, 0);
    assert_eq!(session.memory_snapshot(), before);
    assert_eq!(session.stats().get("normalize"), FunctionStats { calls: 1, errors: 1 });
}

#[test]
fn test_bad_quat_returns_null() {
    let mut session = session(STRATEGY);
    let v = session.alloc_record(&Vec3Record::UNIT_Z).unwrap();

    let raw: i32 = session.call("call_mul_vec3", (0, v.as_i32())).unwrap();

    assert_eq!(raw, 0);
}

#[test]
fn test_region_exhaustion_until_end_frame() {
    let mut session = session(STRATEGY);

    // Vec3 records take 16 bytes each after alignment; one page holds 4096.
    for _ in 0..PAGE / 16 {
        let raw: i32 = session.call("call_unit_z", ()).unwrap();
        assert_ne!(raw, 0);
    }
    let raw: i32 = session.call("call_unit_z", ()).unwrap();
    assert_eq!(raw, 0);
    assert_eq!(session.stats().get("unit_z").errors, 1);

    session.end_frame().unwrap();

    let raw: i32 = session.call("call_unit_z", ()).unwrap();
    assert_eq!(result_address(raw).as_usize(), PAGE);
}

#[test]
fn test_end_frame_zeroes_previous_results() {
    let mut session = session(STRATEGY);
    let addr = result_address(session.call("call_unit_z", ()).unwrap());

    session.end_frame().unwrap();

    assert_eq!(session.read_bytes(addr, 12).unwrap(), vec![0u8; 12]);
}

#[test]
fn test_camera_forward() {
    let mut session = session(STRATEGY);
    let out = GUEST_FORWARD;
    let (s, c) = FRAC_PI_4.sin_cos();

    let status: i32 = session
        .call("camera_forward", (0.0f32, 0.0f32, 0.0f32, 1.0f32, out))
        .unwrap();
    assert_eq!(status, 0);
    assert_eq!(
        session.read_record::<Vec3Record>(result_address(out)).unwrap(),
        Vec3Record::UNIT_Z
    );

    let status: i32 = session
        .call("camera_forward", (s, 0.0f32, 0.0f32, c, out))
        .unwrap();
    assert_eq!(status, 0);
    assert_vec3_near(
        session.read_record(result_address(out)).unwrap(),
        Vec3Record::new(0.0, -1.0, 0.0),
        1e-6,
    );

    let stats = session.stats();
    assert_eq!(stats.total_calls(), 6);
    assert_eq!(stats.total_errors(), 0);
}
