//! Host-side error types for the glam-bridge sandbox.
//!
//! `HostError` carries the detail the host logs. The guest only ever sees
//! the wire errno from [`to_errno`](HostError::to_errno), which is
//! `missing_memory` for every variant.

use glam_bridge_schema::{BoundaryAddress, Errno};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// A record range falls outside guest memory or starts at null.
    #[error("missing memory: {len} bytes at {addr} (memory size {memory_size})")]
    MissingMemory {
        addr: BoundaryAddress,
        len: usize,
        memory_size: usize,
    },

    /// The guest module has no `memory` export to read or write.
    #[error("guest does not export memory")]
    NoMemoryExport,

    /// The host bump region cannot fit another record this frame.
    #[error("host region exhausted: requested {requested} bytes, {remaining} remaining")]
    HostRegionExhausted { requested: usize, remaining: usize },

    /// An internal host error not tied to a guest address.
    #[error("internal host error: {0}")]
    Internal(String),
}

impl HostError {
    pub fn missing_memory(addr: BoundaryAddress, len: usize, memory_size: usize) -> Self {
        Self::MissingMemory {
            addr,
            len,
            memory_size,
        }
    }

    /// Wire errno reported to the guest.
    pub fn to_errno(&self) -> Errno {
        match self {
            Self::MissingMemory { .. }
            | Self::NoMemoryExport
            | Self::HostRegionExhausted { .. }
            | Self::Internal(_) => Errno::MissingMemory,
        }
    }

    /// Convert to the `i32` status returned to the WASM guest.
    pub fn to_error_code(&self) -> i32 {
        self.to_errno().as_i32()
    }
}
