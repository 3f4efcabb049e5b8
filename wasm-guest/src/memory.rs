//! The guest's view of its own linear memory.
//!
//! Buffers are allocated from the scratch arena. Reads and writes inside the
//! arena go through it; anything else (host-allocated results, caller-chosen
//! output buffers) is accessed in place after a bounds check against the
//! current memory size.

use core::arch::wasm32;

use glam_bridge_guest::{GuestResult, LinearMemory, ScratchArena};
use glam_bridge_schema::{BoundaryAddress, BoundaryResult, Errno};

const PAGE_SIZE: usize = 65_536;

pub struct WasmMemory<'a> {
    arena: &'a ScratchArena,
}

impl<'a> WasmMemory<'a> {
    pub fn new(arena: &'a ScratchArena) -> Self {
        Self { arena }
    }
}

/// Start of `[addr, addr + len)` if it lies inside linear memory.
fn linear_range(addr: BoundaryAddress, len: usize) -> BoundaryResult<usize> {
    if addr.is_null() {
        return Err(Errno::MissingMemory);
    }
    let end = addr.end(len).ok_or(Errno::MissingMemory)?;
    if end > wasm32::memory_size::<0>() * PAGE_SIZE {
        return Err(Errno::MissingMemory);
    }
    Ok(addr.as_usize())
}

impl LinearMemory for WasmMemory<'_> {
    fn allocate(&self, size: usize) -> GuestResult<BoundaryAddress> {
        self.arena.allocate(size)
    }

    fn load(&self, addr: BoundaryAddress, out: &mut [u8]) -> BoundaryResult<()> {
        if self.arena.contains(addr, out.len()) {
            return self.arena.load(addr, out);
        }
        let start = linear_range(addr, out.len())?;
        // SAFETY: the range was checked against the memory size above.
        unsafe {
            core::ptr::copy_nonoverlapping(start as *const u8, out.as_mut_ptr(), out.len());
        }
        Ok(())
    }

    fn store(&self, addr: BoundaryAddress, bytes: &[u8]) -> BoundaryResult<()> {
        if self.arena.contains(addr, bytes.len()) {
            return self.arena.store(addr, bytes);
        }
        let start = linear_range(addr, bytes.len())?;
        // SAFETY: as in `load`.
        unsafe {
            core::ptr::copy_nonoverlapping(bytes.as_ptr(), start as *mut u8, bytes.len());
        }
        Ok(())
    }
}
