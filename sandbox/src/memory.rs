//! Guest linear memory access with bounds checking, and the host bump
//! allocator.
//!
//! Every function validates the full `[addr, addr + len)` range against the
//! guest's memory before touching it. The null address is never valid.
//! Failures are `HostError::MissingMemory`, which the guest sees as
//! `missing_memory`.

use std::ops::Range;

use glam_bridge_hostapi::HostError;
use glam_bridge_schema::{BoundaryAddress, Record, MAX_RECORD_SIZE};

/// Bytes per wasm page.
pub const PAGE_SIZE: usize = 65_536;

/// Validate `[addr, addr + len)` against a memory of `mem_size` bytes.
pub fn check_range(mem_size: usize, addr: BoundaryAddress, len: usize) -> Result<Range<usize>, HostError> {
    let missing = || HostError::missing_memory(addr, len, mem_size);
    if addr.is_null() {
        return Err(missing());
    }
    let end = addr.end(len).ok_or_else(missing)?;
    if end > mem_size {
        return Err(missing());
    }
    Ok(addr.as_usize()..end)
}

/// Borrow `len` bytes of guest memory at `addr`.
pub fn read_bytes(mem: &[u8], addr: BoundaryAddress, len: usize) -> Result<&[u8], HostError> {
    let range = check_range(mem.len(), addr, len)?;
    Ok(&mem[range])
}

/// Copy `data` into guest memory at `addr`.
pub fn write_bytes(mem: &mut [u8], addr: BoundaryAddress, data: &[u8]) -> Result<(), HostError> {
    let range = check_range(mem.len(), addr, data.len())?;
    mem[range].copy_from_slice(data);
    Ok(())
}

/// Decode the record at `addr`.
pub fn read_record<R: Record>(mem: &[u8], addr: BoundaryAddress) -> Result<R, HostError> {
    Ok(R::decode(read_bytes(mem, addr, R::SIZE)?))
}

/// Encode `record` at `addr`. Nothing is written unless the whole range is
/// valid.
pub fn write_record<R: Record>(mem: &mut [u8], addr: BoundaryAddress, record: &R) -> Result<(), HostError> {
    let mut buf = [0u8; MAX_RECORD_SIZE];
    record.encode_into(&mut buf[..R::SIZE]);
    write_bytes(mem, addr, &buf[..R::SIZE])
}

/// Compute how many 8-byte-aligned bytes are needed.
fn align8(size: usize) -> usize {
    (size + 7) & !7
}

/// Host-side bump allocator within guest memory.
///
/// After instantiation the sandbox grows memory to reserve a region for
/// host-allocated records. Allocations are bump-pointer style with no
/// individual frees; the whole region is reclaimed at the frame checkpoint.
/// The region never grows after reservation, since the guest's own
/// allocator may claim the pages that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAllocator {
    /// Base address of the host allocation region in guest memory.
    pub base: usize,
    /// Current bump offset from base.
    pub bump: usize,
    /// Total bytes available in the allocation region.
    pub capacity: usize,
}

impl HostAllocator {
    /// Create a new allocator for a region starting at `base` with `capacity` bytes.
    pub fn new(base: usize, capacity: usize) -> Self {
        Self {
            base,
            bump: 0,
            capacity,
        }
    }

    /// Compute an allocation. Returns `(addr, new_bump)`; nothing is
    /// reserved until [`commit`](Self::commit).
    pub fn compute_alloc(&self, size: usize) -> Result<(BoundaryAddress, usize), HostError> {
        let aligned = align8(size.max(1));
        let remaining = self.capacity - self.bump;
        let exhausted = || HostError::HostRegionExhausted {
            requested: size,
            remaining,
        };
        if aligned > remaining {
            return Err(exhausted());
        }
        let addr = u32::try_from(self.base + self.bump).map_err(|_| exhausted())?;
        Ok((BoundaryAddress::new(addr), self.bump + aligned))
    }

    /// Update allocator state after a successful allocation.
    pub fn commit(&mut self, new_bump: usize) {
        self.bump = new_bump;
    }

    /// Bytes handed out since the last reset.
    pub fn used(&self) -> usize {
        self.bump
    }

    /// The allocated part of the region.
    pub fn used_range(&self) -> Range<usize> {
        self.base..self.base + self.bump
    }

    /// Frame checkpoint: every host-allocated record becomes invalid.
    pub fn reset(&mut self) {
        self.bump = 0;
    }
}
