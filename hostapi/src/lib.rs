//! `glam-bridge-hostapi`: host API traits and types for the glam-bridge sandbox.
//!
//! This crate defines what the sandbox delegates to once it has decoded the
//! guest's arguments. It provides:
//!
//! - `MathApi` trait: vector math over decoded records
//! - `GlamMath`: `MathApi` backed by `glam`
//! - `InputDevice` trait: per-device key state queries
//! - `MemInput`: in-memory `InputDevice` with frame-edge tracking
//! - `InputTable`: maps the guest's `InputRef` handles to devices
//! - `HostError`: host-side error type with `Errno` conversion
//!
//! Nothing here touches guest memory. Address validation happens in the
//! sandbox before any of these are called.

pub mod error;
pub mod traits;
pub mod glam_math;
pub mod mem_input;
pub mod input_table;

// Re-export commonly used types at the crate root.
pub use error::HostError;
pub use traits::{InputDevice, InputQuery, MathApi};
pub use glam_math::GlamMath;
pub use mem_input::MemInput;
pub use input_table::InputTable;
