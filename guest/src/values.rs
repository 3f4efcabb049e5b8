//! Typed wrappers over records in linear memory.
//!
//! A wrapper is an address plus an ownership tag plus a borrow of the memory
//! it lives in. Field accessors read at the schema offsets; no other code in
//! the guest computes record offsets.

use core::fmt;

use glam_bridge_schema::{
    BoundaryAddress, BoundaryResult, Errno, Field, QuatRecord, Record, Scalar, Vec3Record,
    QUAT_LAYOUT, VEC3_LAYOUT,
};

use crate::codec::MathCodec;
use crate::error::GuestResult;
use crate::memory::{read_record, write_record, LinearMemory};

/// Who is responsible for the buffer behind a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Allocated from the guest arena for this wrapper. Reclaimed at the
    /// next arena reset.
    Owned,
    /// Wrapped from an existing address (caller-provided or host-chosen).
    Borrowed,
}

fn read_f32(mem: &dyn LinearMemory, addr: BoundaryAddress, field: &Field) -> BoundaryResult<f32> {
    mem.read_scalar(addr, field.offset, field.ty)?
        .as_f32()
        .ok_or(Errno::MissingMemory)
}

fn write_f32(mem: &dyn LinearMemory, addr: BoundaryAddress, field: &Field, v: f32) -> BoundaryResult<()> {
    mem.write_scalar(addr, field.offset, Scalar::F32(v))
}

/// A `vec3` record in linear memory.
#[derive(Clone, Copy)]
pub struct Vec3<'m> {
    mem: &'m dyn LinearMemory,
    addr: BoundaryAddress,
    ownership: Ownership,
}

impl<'m> Vec3<'m> {
    /// Allocate a buffer and encode `value` into it.
    pub fn alloc(mem: &'m dyn LinearMemory, value: Vec3Record) -> GuestResult<Self> {
        let addr = mem.allocate(Vec3Record::SIZE)?;
        write_record(mem, addr, &value)?;
        Ok(Self::owned(mem, addr))
    }

    /// Wrap an existing address. Nothing is checked until a field is read.
    pub fn from_address(mem: &'m dyn LinearMemory, addr: BoundaryAddress) -> Self {
        Self {
            mem,
            addr,
            ownership: Ownership::Borrowed,
        }
    }

    pub(crate) fn owned(mem: &'m dyn LinearMemory, addr: BoundaryAddress) -> Self {
        Self {
            mem,
            addr,
            ownership: Ownership::Owned,
        }
    }

    /// Ask the host for `(0, 0, 1)`.
    pub fn unit_z<C: MathCodec + ?Sized>(codec: &C, mem: &'m dyn LinearMemory) -> GuestResult<Self> {
        codec.unit_z(mem)
    }

    /// Unit-length copy of this vector in a new buffer. The zero vector
    /// normalizes to the zero vector.
    pub fn normalize<C: MathCodec + ?Sized>(&self, codec: &C) -> GuestResult<Vec3<'m>> {
        codec.normalize(self)
    }

    pub fn address(&self) -> BoundaryAddress {
        self.addr
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn memory(&self) -> &'m dyn LinearMemory {
        self.mem
    }

    /// Decode the whole record.
    pub fn get(&self) -> BoundaryResult<Vec3Record> {
        read_record(self.mem, self.addr)
    }

    /// Overwrite the whole record.
    pub fn set(&self, value: Vec3Record) -> BoundaryResult<()> {
        write_record(self.mem, self.addr, &value)
    }

    pub fn x(&self) -> BoundaryResult<f32> {
        read_f32(self.mem, self.addr, &VEC3_LAYOUT.fields[0])
    }

    pub fn y(&self) -> BoundaryResult<f32> {
        read_f32(self.mem, self.addr, &VEC3_LAYOUT.fields[1])
    }

    pub fn z(&self) -> BoundaryResult<f32> {
        read_f32(self.mem, self.addr, &VEC3_LAYOUT.fields[2])
    }

    pub fn set_x(&self, x: f32) -> BoundaryResult<()> {
        write_f32(self.mem, self.addr, &VEC3_LAYOUT.fields[0], x)
    }

    pub fn set_y(&self, y: f32) -> BoundaryResult<()> {
        write_f32(self.mem, self.addr, &VEC3_LAYOUT.fields[1], y)
    }

    pub fn set_z(&self, z: f32) -> BoundaryResult<()> {
        write_f32(self.mem, self.addr, &VEC3_LAYOUT.fields[2], z)
    }
}

impl fmt::Debug for Vec3<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vec3")
            .field("addr", &self.addr)
            .field("ownership", &self.ownership)
            .finish()
    }
}

/// A `quat` record in linear memory.
#[derive(Clone, Copy)]
pub struct Quat<'m> {
    mem: &'m dyn LinearMemory,
    addr: BoundaryAddress,
    ownership: Ownership,
}

impl<'m> Quat<'m> {
    /// Allocate a buffer and encode `value` into it.
    pub fn alloc(mem: &'m dyn LinearMemory, value: QuatRecord) -> GuestResult<Self> {
        let addr = mem.allocate(QuatRecord::SIZE)?;
        write_record(mem, addr, &value)?;
        Ok(Self {
            mem,
            addr,
            ownership: Ownership::Owned,
        })
    }

    /// Wrap an existing address. Nothing is checked until a field is read.
    pub fn from_address(mem: &'m dyn LinearMemory, addr: BoundaryAddress) -> Self {
        Self {
            mem,
            addr,
            ownership: Ownership::Borrowed,
        }
    }

    /// Rotate `v` by this quaternion into a new buffer.
    pub fn mul_vec3<C: MathCodec + ?Sized>(&self, codec: &C, v: &Vec3<'m>) -> GuestResult<Vec3<'m>> {
        codec.mul_vec3(self, v)
    }

    pub fn address(&self) -> BoundaryAddress {
        self.addr
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn memory(&self) -> &'m dyn LinearMemory {
        self.mem
    }

    pub fn get(&self) -> BoundaryResult<QuatRecord> {
        read_record(self.mem, self.addr)
    }

    /// Overwrite the whole record.
    pub fn set(&self, value: QuatRecord) -> BoundaryResult<()> {
        write_record(self.mem, self.addr, &value)
    }

    pub fn x(&self) -> BoundaryResult<f32> {
        read_f32(self.mem, self.addr, &QUAT_LAYOUT.fields[0])
    }

    pub fn y(&self) -> BoundaryResult<f32> {
        read_f32(self.mem, self.addr, &QUAT_LAYOUT.fields[1])
    }

    pub fn z(&self) -> BoundaryResult<f32> {
        read_f32(self.mem, self.addr, &QUAT_LAYOUT.fields[2])
    }

    pub fn w(&self) -> BoundaryResult<f32> {
        read_f32(self.mem, self.addr, &QUAT_LAYOUT.fields[3])
    }

    pub fn set_x(&self, x: f32) -> BoundaryResult<()> {
        write_f32(self.mem, self.addr, &QUAT_LAYOUT.fields[0], x)
    }

    pub fn set_y(&self, y: f32) -> BoundaryResult<()> {
        write_f32(self.mem, self.addr, &QUAT_LAYOUT.fields[1], y)
    }

    pub fn set_z(&self, z: f32) -> BoundaryResult<()> {
        write_f32(self.mem, self.addr, &QUAT_LAYOUT.fields[2], z)
    }

    pub fn set_w(&self, w: f32) -> BoundaryResult<()> {
        write_f32(self.mem, self.addr, &QUAT_LAYOUT.fields[3], w)
    }
}

impl fmt::Debug for Quat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quat")
            .field("addr", &self.addr)
            .field("ownership", &self.ownership)
            .finish()
    }
}
