//! Raw boundary functions as the guest sees them.
//!
//! These traits mirror the wasm imports one to one: record arguments are
//! addresses, results are the raw wire values. Decoding and status checks
//! happen in [`crate::codec`], never here.
//!
//! Every method receives the linear memory the addresses point into. The
//! real wasm bridge ignores it (the host reaches guest memory directly);
//! test hosts use it to read inputs and write outputs.

use glam_bridge_schema::{BoundaryAddress, InputRef, KeyCode};

use crate::memory::LinearMemory;

/// Math imports under `CodecStrategy::GuestAllocates`.
///
/// The guest passes the output address; the host returns an errno tag.
pub trait GuestAllocatesAbi {
    fn unit_z(&self, mem: &dyn LinearMemory, out: BoundaryAddress) -> i32;

    fn normalize(&self, mem: &dyn LinearMemory, input: BoundaryAddress, out: BoundaryAddress) -> i32;

    fn mul_vec3(
        &self,
        mem: &dyn LinearMemory,
        q: BoundaryAddress,
        v: BoundaryAddress,
        out: BoundaryAddress,
    ) -> i32;
}

/// Math imports under `CodecStrategy::HostAllocates`.
///
/// The host chooses the output address and returns it; null means
/// `missing_memory`.
pub trait HostAllocatesAbi {
    fn unit_z(&self, mem: &dyn LinearMemory) -> BoundaryAddress;

    fn normalize(&self, mem: &dyn LinearMemory, input: BoundaryAddress) -> BoundaryAddress;

    fn mul_vec3(&self, mem: &dyn LinearMemory, q: BoundaryAddress, v: BoundaryAddress) -> BoundaryAddress;
}

/// Input query imports. The host is trusted: no error cases.
pub trait InputAbi {
    fn just_pressed(&self, input: InputRef, code: KeyCode) -> bool;

    fn just_released(&self, input: InputRef, code: KeyCode) -> bool;

    fn pressed(&self, input: InputRef, code: KeyCode) -> bool;
}

impl<T: GuestAllocatesAbi + ?Sized> GuestAllocatesAbi for &T {
    fn unit_z(&self, mem: &dyn LinearMemory, out: BoundaryAddress) -> i32 {
        (**self).unit_z(mem, out)
    }

    fn normalize(&self, mem: &dyn LinearMemory, input: BoundaryAddress, out: BoundaryAddress) -> i32 {
        (**self).normalize(mem, input, out)
    }

    fn mul_vec3(
        &self,
        mem: &dyn LinearMemory,
        q: BoundaryAddress,
        v: BoundaryAddress,
        out: BoundaryAddress,
    ) -> i32 {
        (**self).mul_vec3(mem, q, v, out)
    }
}

impl<T: HostAllocatesAbi + ?Sized> HostAllocatesAbi for &T {
    fn unit_z(&self, mem: &dyn LinearMemory) -> BoundaryAddress {
        (**self).unit_z(mem)
    }

    fn normalize(&self, mem: &dyn LinearMemory, input: BoundaryAddress) -> BoundaryAddress {
        (**self).normalize(mem, input)
    }

    fn mul_vec3(&self, mem: &dyn LinearMemory, q: BoundaryAddress, v: BoundaryAddress) -> BoundaryAddress {
        (**self).mul_vec3(mem, q, v)
    }
}

impl<T: InputAbi + ?Sized> InputAbi for &T {
    fn just_pressed(&self, input: InputRef, code: KeyCode) -> bool {
        (**self).just_pressed(input, code)
    }

    fn just_released(&self, input: InputRef, code: KeyCode) -> bool {
        (**self).just_released(input, code)
    }

    fn pressed(&self, input: InputRef, code: KeyCode) -> bool {
        (**self).pressed(input, code)
    }
}
