//! `glam-bridge-guest`: the guest half of the glam-bridge boundary.
//!
//! Runs inside the sandboxed module. It owns the scratch arena that records
//! are marshaled through, encodes outgoing records, invokes the boundary
//! functions by address, and checks every status before it decodes a result.
//!
//! The boundary itself is abstracted behind the traits in [`abi`] so the
//! same codec runs against real wasm imports and against test stubs.
//!
//! Memory model: every buffer comes from a [`ScratchArena`] and is reclaimed
//! in bulk by [`ScratchArena::reset`] at the end of a frame. Wrappers borrow
//! the arena, so none can outlive the reset.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod memory;
pub mod abi;
pub mod codec;
pub mod values;
pub mod input;

pub use error::{GuestError, GuestResult};
pub use memory::{LinearMemory, ScratchArena};
pub use abi::{GuestAllocatesAbi, HostAllocatesAbi, InputAbi};
pub use codec::{GuestAllocated, HostAllocated, MathCodec};
pub use values::{Ownership, Quat, Vec3};
pub use input::{just_pressed, just_released, InputBinding};
