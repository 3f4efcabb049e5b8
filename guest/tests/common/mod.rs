//! Fake hosts for guest codec tests.
//!
//! `FakeHost` plays the host side of both math bindings and the input
//! functions against whatever `LinearMemory` the guest passes in. It does
//! what the real host does: validate every address before touching memory,
//! compute with glam, and answer with the wire-level value.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;

use glam_bridge_guest::{GuestAllocatesAbi, HostAllocatesAbi, InputAbi, LinearMemory};
use glam_bridge_guest::memory::{read_record, write_record};
use glam_bridge_schema::{
    BoundaryAddress, BoundaryResult, Errno, InputRef, KeyCode, QuatRecord, Vec3Record,
};

/// One observed boundary call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UnitZ,
    Normalize,
    MulVec3,
    JustPressed(InputRef, KeyCode),
    JustReleased(InputRef, KeyCode),
    Pressed(InputRef, KeyCode),
}

#[derive(Default)]
pub struct FakeHost {
    pub calls: RefCell<Vec<Call>>,
    /// Keys reported by `just_pressed`.
    pub just_pressed: BTreeSet<u32>,
    /// Keys reported by `just_released`.
    pub just_released: BTreeSet<u32>,
    /// Keys reported by `pressed`.
    pub held: BTreeSet<u32>,
    /// Status the math functions answer with instead of computing.
    pub forced_status: Option<i32>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressing(codes: &[KeyCode]) -> Self {
        Self {
            just_pressed: codes.iter().map(|c| c.code()).collect(),
            ..Self::default()
        }
    }

    pub fn releasing(codes: &[KeyCode]) -> Self {
        Self {
            just_released: codes.iter().map(|c| c.code()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn to_glam(v: Vec3Record) -> glam::Vec3 {
    glam::Vec3::new(v.x, v.y, v.z)
}

fn from_glam(v: glam::Vec3) -> Vec3Record {
    Vec3Record::new(v.x, v.y, v.z)
}

fn quat_to_glam(q: QuatRecord) -> glam::Quat {
    glam::Quat::from_xyzw(q.x, q.y, q.z, q.w)
}

fn unit_z() -> Vec3Record {
    from_glam(glam::Vec3::Z)
}

fn normalize(mem: &dyn LinearMemory, input: BoundaryAddress) -> BoundaryResult<Vec3Record> {
    let v: Vec3Record = read_record(mem, input)?;
    Ok(from_glam(to_glam(v).normalize_or_zero()))
}

fn mul_vec3(
    mem: &dyn LinearMemory,
    q: BoundaryAddress,
    v: BoundaryAddress,
) -> BoundaryResult<Vec3Record> {
    let q: QuatRecord = read_record(mem, q)?;
    let v: Vec3Record = read_record(mem, v)?;
    Ok(from_glam(quat_to_glam(q).mul_vec3(to_glam(v))))
}

/// Validate the output range before writing, then report the errno.
fn write_out(mem: &dyn LinearMemory, out: BoundaryAddress, value: BoundaryResult<Vec3Record>) -> i32 {
    let status = value.and_then(|v| write_record(mem, out, &v));
    match status {
        Ok(()) => Errno::Ok.as_i32(),
        Err(e) => e.as_i32(),
    }
}

impl GuestAllocatesAbi for FakeHost {
    fn unit_z(&self, mem: &dyn LinearMemory, out: BoundaryAddress) -> i32 {
        self.record(Call::UnitZ);
        if let Some(status) = self.forced_status {
            return status;
        }
        write_out(mem, out, Ok(unit_z()))
    }

    fn normalize(&self, mem: &dyn LinearMemory, input: BoundaryAddress, out: BoundaryAddress) -> i32 {
        self.record(Call::Normalize);
        if let Some(status) = self.forced_status {
            return status;
        }
        write_out(mem, out, normalize(mem, input))
    }

    fn mul_vec3(
        &self,
        mem: &dyn LinearMemory,
        q: BoundaryAddress,
        v: BoundaryAddress,
        out: BoundaryAddress,
    ) -> i32 {
        self.record(Call::MulVec3);
        if let Some(status) = self.forced_status {
            return status;
        }
        write_out(mem, out, mul_vec3(mem, q, v))
    }
}

/// Host-allocating variant: the host takes its output buffer from the same
/// memory and hands back the address, or null on failure.
fn host_out(mem: &dyn LinearMemory, value: BoundaryResult<Vec3Record>) -> BoundaryAddress {
    let Ok(v) = value else {
        return BoundaryAddress::NULL;
    };
    let Ok(out) = mem.allocate(12) else {
        return BoundaryAddress::NULL;
    };
    match write_record(mem, out, &v) {
        Ok(()) => out,
        Err(_) => BoundaryAddress::NULL,
    }
}

impl HostAllocatesAbi for FakeHost {
    fn unit_z(&self, mem: &dyn LinearMemory) -> BoundaryAddress {
        self.record(Call::UnitZ);
        host_out(mem, Ok(unit_z()))
    }

    fn normalize(&self, mem: &dyn LinearMemory, input: BoundaryAddress) -> BoundaryAddress {
        self.record(Call::Normalize);
        host_out(mem, normalize(mem, input))
    }

    fn mul_vec3(&self, mem: &dyn LinearMemory, q: BoundaryAddress, v: BoundaryAddress) -> BoundaryAddress {
        self.record(Call::MulVec3);
        host_out(mem, mul_vec3(mem, q, v))
    }
}

impl InputAbi for FakeHost {
    fn just_pressed(&self, input: InputRef, code: KeyCode) -> bool {
        self.record(Call::JustPressed(input, code));
        self.just_pressed.contains(&code.code())
    }

    fn just_released(&self, input: InputRef, code: KeyCode) -> bool {
        self.record(Call::JustReleased(input, code));
        self.just_released.contains(&code.code())
    }

    fn pressed(&self, input: InputRef, code: KeyCode) -> bool {
        self.record(Call::Pressed(input, code));
        self.held.contains(&code.code())
    }
}

pub fn assert_vec3_near(actual: Vec3Record, expected: Vec3Record) {
    let eps = 1e-6;
    assert!(
        (actual.x - expected.x).abs() < eps
            && (actual.y - expected.y).abs() < eps
            && (actual.z - expected.z).abs() < eps,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
