//! Sandbox error types.

use glam_bridge_hostapi::HostError;
use glam_bridge_schema::CodecStrategy;

/// Top-level error type for the sandbox crate.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// Wasmtime engine, compilation, instantiation or export lookup error.
    #[error("wasmtime error: {0}")]
    Wasmtime(#[from] anyhow::Error),

    /// The module does not fit the schema (exports, unknown imports,
    /// signatures).
    #[error("invalid module: {0}")]
    InvalidModule(String),

    /// The module imports a math function from the binding the sandbox is
    /// not bound to.
    #[error("mixed binding: {module}::{name} belongs to {found:?}, sandbox is bound to {bound:?}")]
    MixedBinding {
        module: String,
        name: String,
        bound: CodecStrategy,
        found: CodecStrategy,
    },

    /// A session helper touched guest memory outside its bounds or ran out
    /// of host region.
    #[error("boundary error: {0}")]
    Boundary(#[from] HostError),

    /// The host region could not be reserved at instantiation.
    #[error("host region: {0}")]
    HostRegion(String),

    /// Fuel ran out before the guest call returned.
    #[error("fuel exhausted (instruction limit)")]
    FuelExhausted,

    /// The guest trapped (`unreachable`, out-of-bounds access, ...).
    #[error("guest trapped: {0}")]
    GuestTrapped(String),
}
