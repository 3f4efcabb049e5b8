//! Guest linear memory access and the scratch arena.
//!
//! [`LinearMemory`] is the guest codec's only view of memory: allocate a
//! buffer, copy bytes in or out at an address. [`ScratchArena`] is the
//! allocator every record buffer comes from. It never frees individual
//! buffers; [`ScratchArena::reset`] reclaims everything at once at the frame
//! checkpoint.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::Cell;
use core::ops::Range;

use glam_bridge_schema::{
    BoundaryAddress, BoundaryResult, Errno, Record, Scalar, ScalarType, MAX_RECORD_SIZE,
};

use crate::error::{GuestError, GuestResult};

/// Allocation alignment. Every record field is a 4-byte scalar.
const ALIGN: usize = 4;

fn align4(size: usize) -> usize {
    (size + ALIGN - 1) & !(ALIGN - 1)
}

/// Byte-level access to the guest's linear memory.
pub trait LinearMemory {
    /// Allocate `size` bytes and return their address.
    fn allocate(&self, size: usize) -> GuestResult<BoundaryAddress>;

    /// Copy `out.len()` bytes starting at `addr` into `out`.
    fn load(&self, addr: BoundaryAddress, out: &mut [u8]) -> BoundaryResult<()>;

    /// Copy `bytes` to memory starting at `addr`.
    fn store(&self, addr: BoundaryAddress, bytes: &[u8]) -> BoundaryResult<()>;

    /// Read one scalar `offset` bytes past `addr`.
    fn read_scalar(
        &self,
        addr: BoundaryAddress,
        offset: usize,
        ty: ScalarType,
    ) -> BoundaryResult<Scalar> {
        let at = field_address(addr, offset)?;
        let mut buf = [0u8; 4];
        self.load(at, &mut buf[..ty.size()])?;
        Ok(Scalar::from_le_bytes(ty, buf))
    }

    /// Write one scalar `offset` bytes past `addr`.
    fn write_scalar(&self, addr: BoundaryAddress, offset: usize, value: Scalar) -> BoundaryResult<()> {
        let at = field_address(addr, offset)?;
        self.store(at, &value.to_le_bytes()[..value.ty().size()])
    }
}

fn field_address(addr: BoundaryAddress, offset: usize) -> BoundaryResult<BoundaryAddress> {
    u32::try_from(offset)
        .ok()
        .and_then(|off| addr.offset(off))
        .ok_or(Errno::MissingMemory)
}

/// Decode the record stored at `addr`.
pub fn read_record<R: Record>(mem: &dyn LinearMemory, addr: BoundaryAddress) -> BoundaryResult<R> {
    let mut buf = [0u8; MAX_RECORD_SIZE];
    mem.load(addr, &mut buf[..R::SIZE])?;
    Ok(R::decode(&buf[..R::SIZE]))
}

/// Encode `record` into the buffer at `addr`.
pub fn write_record<R: Record>(
    mem: &dyn LinearMemory,
    addr: BoundaryAddress,
    record: &R,
) -> BoundaryResult<()> {
    let mut buf = [0u8; MAX_RECORD_SIZE];
    record.encode_into(&mut buf[..R::SIZE]);
    mem.store(addr, &buf[..R::SIZE])
}

/// Bump allocator over a fixed block of guest memory.
///
/// Interior mutability lets wrappers hold `&ScratchArena` while further
/// buffers are allocated; `reset` takes `&mut self`, so every wrapper must
/// be gone before the arena is reclaimed.
///
/// Only the allocated prefix is addressable. Loads and stores that touch
/// bytes outside it fail with `missing_memory` and leave memory untouched.
pub struct ScratchArena {
    cells: Box<[Cell<u8>]>,
    base: u32,
    bump: Cell<usize>,
}

impl ScratchArena {
    /// Base address of arenas that are not backed by real linear memory.
    /// Keeps the null address outside every arena.
    pub const DETACHED_BASE: u32 = 0x1000;

    /// Arena whose addresses start at [`Self::DETACHED_BASE`].
    pub fn new(capacity: usize) -> Self {
        Self::with_base(capacity, Self::DETACHED_BASE)
    }

    /// Arena whose first byte is addressed as `base`.
    pub fn with_base(capacity: usize, base: u32) -> Self {
        let cells: Box<[Cell<u8>]> = (0..capacity).map(|_| Cell::new(0)).collect();
        Self {
            cells,
            base,
            bump: Cell::new(0),
        }
    }

    /// Arena addressed by where its block actually sits in wasm linear
    /// memory, so the host can read and write it through the addresses the
    /// guest hands out.
    #[cfg(target_arch = "wasm32")]
    pub fn in_linear_memory(capacity: usize) -> Self {
        let mut arena = Self::with_base(capacity, 0);
        arena.base = arena.cells.as_ptr() as usize as u32;
        arena
    }

    pub fn base(&self) -> BoundaryAddress {
        BoundaryAddress::new(self.base)
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Bytes handed out since the last reset, including alignment padding.
    pub fn used(&self) -> usize {
        self.bump.get()
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.used()
    }

    /// Frame checkpoint: reclaim every buffer at once and zero the block.
    pub fn reset(&mut self) {
        let used = self.bump.get();
        for cell in &self.cells[..used] {
            cell.set(0);
        }
        self.bump.set(0);
    }

    /// Copy of the allocated prefix.
    pub fn snapshot(&self) -> Vec<u8> {
        self.cells[..self.used()].iter().map(Cell::get).collect()
    }

    /// True if `[addr, addr + len)` lies inside the allocated prefix.
    pub fn contains(&self, addr: BoundaryAddress, len: usize) -> bool {
        self.range(addr, len).is_ok()
    }

    fn range(&self, addr: BoundaryAddress, len: usize) -> BoundaryResult<Range<usize>> {
        if addr.is_null() || addr.get() < self.base {
            return Err(Errno::MissingMemory);
        }
        let start = (addr.get() - self.base) as usize;
        let end = start.checked_add(len).ok_or(Errno::MissingMemory)?;
        if end > self.used() {
            return Err(Errno::MissingMemory);
        }
        Ok(start..end)
    }
}

impl LinearMemory for ScratchArena {
    fn allocate(&self, size: usize) -> GuestResult<BoundaryAddress> {
        let aligned = align4(size.max(1));
        let start = self.bump.get();
        let remaining = self.remaining();
        let exhausted = GuestError::ArenaExhausted {
            requested: size,
            remaining,
        };
        if aligned > remaining {
            return Err(exhausted);
        }
        let addr = u32::try_from(start)
            .ok()
            .and_then(|off| self.base.checked_add(off))
            .ok_or(exhausted)?;
        self.bump.set(start + aligned);
        Ok(BoundaryAddress::new(addr))
    }

    fn load(&self, addr: BoundaryAddress, out: &mut [u8]) -> BoundaryResult<()> {
        let range = self.range(addr, out.len())?;
        for (dst, cell) in out.iter_mut().zip(&self.cells[range]) {
            *dst = cell.get();
        }
        Ok(())
    }

    fn store(&self, addr: BoundaryAddress, bytes: &[u8]) -> BoundaryResult<()> {
        let range = self.range(addr, bytes.len())?;
        for (cell, src) in self.cells[range].iter().zip(bytes) {
            cell.set(*src);
        }
        Ok(())
    }
}
