//! Sandbox configuration.

use glam_bridge_schema::CodecStrategy;
use serde::Deserialize;

/// Configuration for the WASM sandbox.
///
/// Controls memory limits, instruction fuel, and the codec binding. Missing
/// fields take their defaults when read from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// Maximum linear memory pages (1 page = 64 KiB).
    /// Default: 256 pages = 16 MiB.
    pub max_memory_pages: u32,

    /// Wasmtime fuel per frame (instruction metering).
    /// Prevents infinite loops in pure guest compute.
    pub fuel_limit: u64,

    /// Which side allocates math output records. A module built for the
    /// other binding is rejected at load.
    pub strategy: CodecStrategy,

    /// Pages reserved after instantiation for host-allocated records.
    pub host_alloc_pages: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            max_memory_pages: 256,       // 16 MiB
            fuel_limit: 100_000_000,
            strategy: CodecStrategy::GuestAllocates,
            host_alloc_pages: 1,
        }
    }
}

impl SandboxConfig {
    /// Default limits bound to `strategy`.
    pub fn for_strategy(strategy: CodecStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}
