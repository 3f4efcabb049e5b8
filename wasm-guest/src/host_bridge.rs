//! WASM host bridge: implements the boundary ABI traits by calling the
//! imported functions.
//!
//! The host reads and writes guest memory itself, so the memory handle the
//! traits pass in is not needed here.

use glam_bridge_guest::{InputAbi, LinearMemory};
use glam_bridge_schema::{BoundaryAddress, InputRef, KeyCode};

use crate::imports;

/// Zero-sized handle for the imported boundary functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmBoundary;

#[cfg(not(feature = "host-allocates"))]
impl glam_bridge_guest::GuestAllocatesAbi for WasmBoundary {
    fn unit_z(&self, _mem: &dyn LinearMemory, out: BoundaryAddress) -> i32 {
        unsafe { imports::unit_z(out.as_i32()) }
    }

    fn normalize(&self, _mem: &dyn LinearMemory, input: BoundaryAddress, out: BoundaryAddress) -> i32 {
        unsafe { imports::normalize(input.as_i32(), out.as_i32()) }
    }

    fn mul_vec3(
        &self,
        _mem: &dyn LinearMemory,
        q: BoundaryAddress,
        v: BoundaryAddress,
        out: BoundaryAddress,
    ) -> i32 {
        unsafe { imports::mul_vec3(q.as_i32(), v.as_i32(), out.as_i32()) }
    }
}

#[cfg(feature = "host-allocates")]
impl glam_bridge_guest::HostAllocatesAbi for WasmBoundary {
    fn unit_z(&self, _mem: &dyn LinearMemory) -> BoundaryAddress {
        BoundaryAddress::from_i32(unsafe { imports::unit_z() })
    }

    fn normalize(&self, _mem: &dyn LinearMemory, input: BoundaryAddress) -> BoundaryAddress {
        BoundaryAddress::from_i32(unsafe { imports::normalize(input.as_i32()) })
    }

    fn mul_vec3(&self, _mem: &dyn LinearMemory, q: BoundaryAddress, v: BoundaryAddress) -> BoundaryAddress {
        BoundaryAddress::from_i32(unsafe { imports::mul_vec3(q.as_i32(), v.as_i32()) })
    }
}

impl InputAbi for WasmBoundary {
    fn just_pressed(&self, input: InputRef, code: KeyCode) -> bool {
        unsafe { imports::just_pressed(input.as_i32(), code.as_i32()) != 0 }
    }

    fn just_released(&self, input: InputRef, code: KeyCode) -> bool {
        unsafe { imports::just_released(input.as_i32(), code.as_i32()) != 0 }
    }

    fn pressed(&self, input: InputRef, code: KeyCode) -> bool {
        unsafe { imports::pressed(input.as_i32(), code.as_i32()) != 0 }
    }
}

#[cfg(not(feature = "host-allocates"))]
pub type Codec = glam_bridge_guest::GuestAllocated<WasmBoundary>;

#[cfg(feature = "host-allocates")]
pub type Codec = glam_bridge_guest::HostAllocated<WasmBoundary>;

/// The codec this artifact is compiled for.
#[cfg(not(feature = "host-allocates"))]
pub const CODEC: Codec = glam_bridge_guest::GuestAllocated(WasmBoundary);

#[cfg(feature = "host-allocates")]
pub const CODEC: Codec = glam_bridge_guest::HostAllocated(WasmBoundary);
