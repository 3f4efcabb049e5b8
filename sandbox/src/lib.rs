//! `glam-bridge-sandbox`: Wasmtime host for glam-bridge guests.
//!
//! This crate loads a guest module, checks it against the interface schema
//! and serves the boundary functions to it. It enforces:
//!
//! - **One binding:** imports come from the configured strategy's math
//!   module and `wasm_input` only; mixing bindings is rejected at load
//! - **Signature checks:** every import must match the schema table
//! - **Guarded memory:** every record range is validated before any write,
//!   invalid addresses answer `missing_memory` (or null) and touch nothing
//! - **Fuel metering:** instruction-level metering per frame
//! - **Memory limits:** bounded linear memory growth
//!
//! The primary entry points are [`Sandbox::instantiate`] and
//! [`GuestSession`].

pub mod error;
pub mod config;
pub mod memory;
pub mod host_impl;
pub mod validation;
pub mod linker;
pub mod runtime;

pub use error::SandboxError;
pub use config::SandboxConfig;
pub use host_impl::{CallStats, FunctionStats};
pub use runtime::{GuestSession, Sandbox};
