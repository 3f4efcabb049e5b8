//! `glam-bridge-wasm-guest`: WASM cdylib driving the glam-bridge boundary.
//!
//! Compiles to a `.wasm` artifact that exports:
//!
//! - `camera_forward`: rotate the forward axis by a quaternion
//! - `trigger_just_pressed` / `trigger_just_released`: trigger key queries
//! - `frame_end`: frame checkpoint, reclaims the scratch arena
//!
//! Math functions are imported under `wasm_glam` (default) or, with the
//! `host-allocates` feature, under `wasm_glam_host`. Input queries are
//! imported under `wasm_input`.
//!
//! On wasm32 the crate is `no_std`: `talc` provides the heap the scratch
//! arena lives in and a panic traps. Everything is gated on `wasm32`; a
//! native workspace build produces an empty library.

#![cfg_attr(target_arch = "wasm32", no_std)]

// SAFETY: wasm32-unknown-unknown guests run on a single thread.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: talc::TalckWasm = unsafe { talc::TalckWasm::new_global() };

#[cfg(all(target_arch = "wasm32", not(test)))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    core::arch::wasm32::unreachable()
}

// ── Modules ──

#[cfg(target_arch = "wasm32")]
mod imports;
#[cfg(target_arch = "wasm32")]
mod memory;
#[cfg(target_arch = "wasm32")]
mod host_bridge;
#[cfg(target_arch = "wasm32")]
mod exports;

#[cfg(target_arch = "wasm32")]
pub use exports::{camera_forward, frame_end, trigger_just_pressed, trigger_just_released};
