//! Guest exported functions.
//!
//! - `camera_forward`: rotate the normalized forward axis by a quaternion
//! - `trigger_just_pressed` / `trigger_just_released`: trigger key queries
//! - `frame_end`: frame checkpoint
//!
//! Boundary failures come back as errno tags. Arena exhaustion is fatal and
//! traps; the host sees it as a guest trap and must not retry.

use core::arch::wasm32;
use core::cell::UnsafeCell;

use glam_bridge_guest::memory::write_record;
use glam_bridge_guest::{
    just_pressed, just_released, GuestError, GuestResult, LinearMemory, Quat, ScratchArena, Vec3,
};
use glam_bridge_schema::{BoundaryAddress, Errno, InputRef, QuatRecord};

use crate::host_bridge::{WasmBoundary, CODEC};
use crate::memory::WasmMemory;

/// Scratch bytes available per frame.
const ARENA_CAPACITY: usize = 4096;

/// The frame's scratch arena, created on first use.
///
/// Exports never re-enter each other, so at most one `&mut ScratchArena`
/// exists at a time. A trap inside [`FrameArena::with`] leaves nothing
/// locked; the next `frame_end` still resets the arena.
struct FrameArena(UnsafeCell<Option<ScratchArena>>);

// SAFETY: wasm32-unknown-unknown guests run on a single thread.
unsafe impl Sync for FrameArena {}

impl FrameArena {
    const fn new() -> Self {
        Self(UnsafeCell::new(None))
    }

    fn with<R>(&self, f: impl FnOnce(&mut ScratchArena) -> R) -> R {
        // SAFETY: single thread, no re-entry (see the type docs).
        let slot = unsafe { &mut *self.0.get() };
        let arena = slot.get_or_insert_with(|| ScratchArena::in_linear_memory(ARENA_CAPACITY));
        f(arena)
    }
}

static ARENA: FrameArena = FrameArena::new();

/// Map a guest error to the export's status code. Fatal errors trap.
fn status(result: GuestResult<()>) -> i32 {
    match result {
        Ok(()) => Errno::Ok.as_i32(),
        Err(GuestError::Boundary(errno)) => errno.as_i32(),
        Err(GuestError::UnknownErrno(raw)) => raw as i32,
        Err(GuestError::ArenaExhausted { .. }) => wasm32::unreachable(),
    }
}

fn forward(mem: &dyn LinearMemory, rotation: QuatRecord, out: BoundaryAddress) -> GuestResult<()> {
    let q = Quat::alloc(mem, rotation)?;
    let axis = Vec3::unit_z(&CODEC, mem)?.normalize(&CODEC)?;
    let rotated = q.mul_vec3(&CODEC, &axis)?.get()?;
    write_record(mem, out, &rotated)?;
    Ok(())
}

/// Rotate the forward axis `(0, 0, 1)` by `(qx, qy, qz, qw)` and write the
/// resulting Vec3 to `out_ptr`.
///
/// # Returns
/// 0 on success, an errno tag on failure. `out_ptr` is untouched on failure.
#[no_mangle]
pub extern "C" fn camera_forward(qx: f32, qy: f32, qz: f32, qw: f32, out_ptr: i32) -> i32 {
    let out = BoundaryAddress::from_i32(out_ptr);
    let result = ARENA.with(|arena| {
        let mem = WasmMemory::new(arena);
        forward(&mem, QuatRecord::new(qx, qy, qz, qw), out)
    });
    status(result)
}

/// 1 if the trigger key was pressed this frame on `input_ref`, else 0.
#[no_mangle]
pub extern "C" fn trigger_just_pressed(input_ref: i32) -> i32 {
    just_pressed(&WasmBoundary, InputRef::from_i32(input_ref)) as i32
}

/// 1 if the trigger key was released this frame on `input_ref`, else 0.
#[no_mangle]
pub extern "C" fn trigger_just_released(input_ref: i32) -> i32 {
    just_released(&WasmBoundary, InputRef::from_i32(input_ref)) as i32
}

/// Frame checkpoint: reclaim every scratch buffer.
#[no_mangle]
pub extern "C" fn frame_end() {
    ARENA.with(|arena| arena.reset());
}
