//! Codec strategies for the math functions.
//!
//! A deployment is bound to exactly one strategy. [`GuestAllocated`] and
//! [`HostAllocated`] wrap the matching ABI and expose the same
//! [`MathCodec`] surface, so wrapper code never sees which side allocates.
//!
//! Both strategies check the result tag before a wrapper is built over an
//! output address. A failed call never yields a wrapper.

use glam_bridge_schema::{BoundaryAddress, CodecStrategy, Errno, Record, Vec3Record};

use crate::abi::{GuestAllocatesAbi, HostAllocatesAbi};
use crate::error::{check_status, GuestError, GuestResult};
use crate::memory::LinearMemory;
use crate::values::{Quat, Vec3};

/// Strategy-independent math surface used by the typed wrappers.
///
/// `normalize` and `mul_vec3` always produce a new buffer; their inputs are
/// left untouched. Inputs and output live in the same linear memory.
pub trait MathCodec {
    fn strategy(&self) -> CodecStrategy;

    fn unit_z<'m>(&self, mem: &'m dyn LinearMemory) -> GuestResult<Vec3<'m>>;

    fn normalize<'m>(&self, v: &Vec3<'m>) -> GuestResult<Vec3<'m>>;

    fn mul_vec3<'m>(&self, q: &Quat<'m>, v: &Vec3<'m>) -> GuestResult<Vec3<'m>>;
}

/// `GuestAllocates` binding: allocate the output, pass its address, check
/// the returned errno.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestAllocated<B>(pub B);

impl<B: GuestAllocatesAbi> GuestAllocated<B> {
    /// `unit_z` into a caller-chosen buffer. The result borrows `out`.
    pub fn unit_z_at<'m>(
        &self,
        mem: &'m dyn LinearMemory,
        out: BoundaryAddress,
    ) -> GuestResult<Vec3<'m>> {
        check_status(self.0.unit_z(mem, out))?;
        Ok(Vec3::from_address(mem, out))
    }

    /// `normalize` into a caller-chosen buffer. The result borrows `out`.
    pub fn normalize_at<'m>(&self, v: &Vec3<'m>, out: BoundaryAddress) -> GuestResult<Vec3<'m>> {
        let mem = v.memory();
        check_status(self.0.normalize(mem, v.address(), out))?;
        Ok(Vec3::from_address(mem, out))
    }

    /// `mul_vec3` into a caller-chosen buffer. The result borrows `out`.
    pub fn mul_vec3_at<'m>(
        &self,
        q: &Quat<'m>,
        v: &Vec3<'m>,
        out: BoundaryAddress,
    ) -> GuestResult<Vec3<'m>> {
        let mem = q.memory();
        check_status(self.0.mul_vec3(mem, q.address(), v.address(), out))?;
        Ok(Vec3::from_address(mem, out))
    }
}

impl<B: GuestAllocatesAbi> MathCodec for GuestAllocated<B> {
    fn strategy(&self) -> CodecStrategy {
        CodecStrategy::GuestAllocates
    }

    fn unit_z<'m>(&self, mem: &'m dyn LinearMemory) -> GuestResult<Vec3<'m>> {
        let out = mem.allocate(Vec3Record::SIZE)?;
        check_status(self.0.unit_z(mem, out))?;
        Ok(Vec3::owned(mem, out))
    }

    fn normalize<'m>(&self, v: &Vec3<'m>) -> GuestResult<Vec3<'m>> {
        let mem = v.memory();
        let out = mem.allocate(Vec3Record::SIZE)?;
        check_status(self.0.normalize(mem, v.address(), out))?;
        Ok(Vec3::owned(mem, out))
    }

    fn mul_vec3<'m>(&self, q: &Quat<'m>, v: &Vec3<'m>) -> GuestResult<Vec3<'m>> {
        let mem = q.memory();
        let out = mem.allocate(Vec3Record::SIZE)?;
        check_status(self.0.mul_vec3(mem, q.address(), v.address(), out))?;
        Ok(Vec3::owned(mem, out))
    }
}

/// `HostAllocates` binding: pass inputs only, wrap the address the host
/// returns, treat null as `missing_memory`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostAllocated<B>(pub B);

/// Host-chosen buffers are reclaimed by the host, so the guest only
/// borrows them.
fn host_result(mem: &dyn LinearMemory, addr: BoundaryAddress) -> GuestResult<Vec3<'_>> {
    if addr.is_null() {
        return Err(GuestError::Boundary(Errno::MissingMemory));
    }
    Ok(Vec3::from_address(mem, addr))
}

impl<B: HostAllocatesAbi> MathCodec for HostAllocated<B> {
    fn strategy(&self) -> CodecStrategy {
        CodecStrategy::HostAllocates
    }

    fn unit_z<'m>(&self, mem: &'m dyn LinearMemory) -> GuestResult<Vec3<'m>> {
        host_result(mem, self.0.unit_z(mem))
    }

    fn normalize<'m>(&self, v: &Vec3<'m>) -> GuestResult<Vec3<'m>> {
        let mem = v.memory();
        host_result(mem, self.0.normalize(mem, v.address()))
    }

    fn mul_vec3<'m>(&self, q: &Quat<'m>, v: &Vec3<'m>) -> GuestResult<Vec3<'m>> {
        let mem = q.memory();
        host_result(mem, self.0.mul_vec3(mem, q.address(), v.address()))
    }
}
