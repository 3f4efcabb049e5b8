//! Per-session mutable state held in the Wasmtime Store.
//!
//! `HostState` combines the math and input collaborators, the host bump
//! allocator, per-function call statistics and the store limits into a
//! single struct that lives inside `Store<HostState>` for the lifetime of
//! one guest session.

use std::collections::BTreeMap;

use glam_bridge_hostapi::{InputTable, MathApi};
use glam_bridge_schema::CodecStrategy;
use wasmtime::{StoreLimits, StoreLimitsBuilder};

use crate::memory::{HostAllocator, PAGE_SIZE};

/// Call and error counts for one boundary function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionStats {
    pub calls: u64,
    pub errors: u64,
}

/// Per-function counters, keyed by import name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStats {
    functions: BTreeMap<&'static str, FunctionStats>,
}

impl CallStats {
    pub fn record(&mut self, name: &'static str, ok: bool) {
        let entry = self.functions.entry(name).or_default();
        entry.calls += 1;
        if !ok {
            entry.errors += 1;
        }
    }

    pub fn get(&self, name: &str) -> FunctionStats {
        self.functions.get(name).copied().unwrap_or_default()
    }

    pub fn total_calls(&self) -> u64 {
        self.functions.values().map(|s| s.calls).sum()
    }

    pub fn total_errors(&self) -> u64 {
        self.functions.values().map(|s| s.errors).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FunctionStats)> + '_ {
        self.functions.iter().map(|(name, stats)| (*name, *stats))
    }
}

/// Per-session mutable state held in the Wasmtime `Store`.
pub struct HostState {
    /// Math served to the guest.
    pub math: Box<dyn MathApi + Send>,
    /// Input devices, addressed by the guest's `InputRef` handles.
    pub inputs: InputTable,
    /// Binding the session was instantiated with.
    pub strategy: CodecStrategy,
    /// Host-side bump allocator for guest memory.
    pub host_alloc: HostAllocator,
    /// Boundary call counters.
    pub stats: CallStats,
    /// Memory growth limits enforced by the store.
    pub limits: StoreLimits,
}

impl HostState {
    pub fn new(
        math: Box<dyn MathApi + Send>,
        inputs: InputTable,
        strategy: CodecStrategy,
        max_memory_pages: u32,
    ) -> Self {
        let limits = StoreLimitsBuilder::new()
            .memory_size(max_memory_pages as usize * PAGE_SIZE)
            .instances(1)
            .build();
        Self {
            math,
            inputs,
            strategy,
            stats: CallStats::default(),
            limits,
            // Initialized empty; runtime sets the real region after instantiation
            host_alloc: HostAllocator::new(0, 0),
        }
    }
}
