//! Sandbox runtime: Wasmtime engine, module loading, and guest sessions.
//!
//! The `Sandbox` struct loads a WASM module and validates it against the
//! configured binding. [`Sandbox::instantiate`] creates a [`GuestSession`]:
//! one store, one instance, one host allocation region, driven frame by
//! frame until it is dropped.

use std::path::Path;

use tracing::{debug, info, warn};
use wasmtime::{Config, Engine, Instance, Linker, Memory, Module, Store, Trap, WasmParams, WasmResults};

use glam_bridge_hostapi::{InputTable, MathApi};
use glam_bridge_schema::{BoundaryAddress, CodecStrategy, Record};

use crate::config::SandboxConfig;
use crate::error::SandboxError;
use crate::host_impl::{CallStats, HostState};
use crate::linker::register_host_functions;
use crate::memory::{self, HostAllocator, PAGE_SIZE};
use crate::validation::{validate_module, FRAME_END_EXPORT};

/// The WASM sandbox for one codec binding.
///
/// Loads and validates a WASM module once; every session gets a fresh
/// Wasmtime instance.
pub struct Sandbox {
    engine: Engine,
    module: Module,
    config: SandboxConfig,
}

impl Sandbox {
    /// Create a new sandbox from WASM bytecode (or WAT text).
    ///
    /// Validates the module's exports and imports before accepting.
    pub fn new(wasm_bytes: &[u8], config: SandboxConfig) -> Result<Self, SandboxError> {
        let engine = create_engine()?;
        let module = Module::new(&engine, wasm_bytes)?;
        Self::accept(engine, module, config)
    }

    /// Load from a `.wasm` file path.
    pub fn from_file(path: &Path, config: SandboxConfig) -> Result<Self, SandboxError> {
        let engine = create_engine()?;
        let module = Module::from_file(&engine, path)?;
        Self::accept(engine, module, config)
    }

    fn accept(engine: Engine, module: Module, config: SandboxConfig) -> Result<Self, SandboxError> {
        validate_module(&module, config.strategy)?;
        info!(
            strategy = ?config.strategy,
            imports = module.imports().len(),
            "guest module loaded"
        );
        Ok(Self {
            engine,
            module,
            config,
        })
    }

    pub fn strategy(&self) -> CodecStrategy {
        self.config.strategy
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Start a guest session.
    ///
    /// Creates a fresh store with fuel, registers the bound math functions
    /// and the input functions, instantiates the module, and reserves the
    /// host allocation region by growing guest memory.
    pub fn instantiate(
        &self,
        math: impl MathApi + Send + 'static,
        inputs: InputTable,
    ) -> Result<GuestSession, SandboxError> {
        let state = HostState::new(
            Box::new(math),
            inputs,
            self.config.strategy,
            self.config.max_memory_pages,
        );

        let mut store = Store::new(&self.engine, state);
        store.limiter(|state| &mut state.limits);
        store.set_fuel(self.config.fuel_limit)?;

        let mut linker = Linker::new(&self.engine);
        register_host_functions(&mut linker, self.config.strategy)?;

        let instance = linker.instantiate(&mut store, &self.module)?;

        let wasm_memory = instance
            .get_memory(&mut store, "memory")
            .ok_or_else(|| SandboxError::HostRegion("no memory export".into()))?;

        let current_pages = wasm_memory
            .grow(&mut store, self.config.host_alloc_pages)
            .map_err(|e| SandboxError::HostRegion(format!("initial grow: {}", e)))?;

        let alloc_base = (current_pages as usize) * PAGE_SIZE;
        let alloc_capacity = (self.config.host_alloc_pages as usize) * PAGE_SIZE;
        store.data_mut().host_alloc = HostAllocator::new(alloc_base, alloc_capacity);

        info!(
            strategy = ?self.config.strategy,
            host_region = alloc_base,
            host_region_len = alloc_capacity,
            "guest session started"
        );

        Ok(GuestSession {
            store,
            instance,
            memory: wasm_memory,
            fuel_limit: self.config.fuel_limit,
        })
    }
}

/// One instantiated guest.
pub struct GuestSession {
    store: Store<HostState>,
    instance: Instance,
    memory: Memory,
    fuel_limit: u64,
}

impl GuestSession {
    /// Call a guest export.
    pub fn call<P, R>(&mut self, export: &str, params: P) -> Result<R, SandboxError>
    where
        P: WasmParams,
        R: WasmResults,
    {
        let func = self.instance.get_typed_func::<P, R>(&mut self.store, export)?;
        debug!(export, "calling guest");
        handle_trap(func.call(&mut self.store, params))
    }

    /// Reserve a record in the host region and write `value` into it.
    /// The address stays valid until the next [`end_frame`](Self::end_frame).
    pub fn alloc_record<R: Record>(&mut self, value: &R) -> Result<BoundaryAddress, SandboxError> {
        let (addr, new_bump) = self.store.data().host_alloc.compute_alloc(R::SIZE)?;
        memory::write_record(self.memory.data_mut(&mut self.store), addr, value)?;
        self.store.data_mut().host_alloc.commit(new_bump);
        Ok(addr)
    }

    /// Reserve `len` zeroed bytes in the host region, e.g. for an output
    /// buffer the guest writes into.
    pub fn alloc_bytes(&mut self, len: usize) -> Result<BoundaryAddress, SandboxError> {
        let (addr, new_bump) = self.store.data().host_alloc.compute_alloc(len)?;
        memory::write_bytes(self.memory.data_mut(&mut self.store), addr, &vec![0u8; len])?;
        self.store.data_mut().host_alloc.commit(new_bump);
        Ok(addr)
    }

    /// Encode `value` at an arbitrary guest address.
    pub fn write_record<R: Record>(&mut self, addr: BoundaryAddress, value: &R) -> Result<(), SandboxError> {
        memory::write_record(self.memory.data_mut(&mut self.store), addr, value)?;
        Ok(())
    }

    /// Decode the record at `addr`.
    pub fn read_record<R: Record>(&self, addr: BoundaryAddress) -> Result<R, SandboxError> {
        Ok(memory::read_record(self.memory.data(&self.store), addr)?)
    }

    /// Copy `len` bytes of guest memory at `addr`.
    pub fn read_bytes(&self, addr: BoundaryAddress, len: usize) -> Result<Vec<u8>, SandboxError> {
        Ok(memory::read_bytes(self.memory.data(&self.store), addr, len)?.to_vec())
    }

    /// Copy of the whole guest memory.
    pub fn memory_snapshot(&self) -> Vec<u8> {
        self.memory.data(&self.store).to_vec()
    }

    /// Current guest memory size in bytes.
    pub fn memory_size(&self) -> usize {
        self.memory.data_size(&self.store)
    }

    /// Frame checkpoint.
    ///
    /// Calls the guest's `frame_end` export if it has one, then zeroes and
    /// reclaims the host region, clears per-frame input edges and refills
    /// fuel. Addresses handed out during the frame are invalid afterwards.
    ///
    /// `frame_end` runs on a fresh fuel budget, so a frame that ran out of
    /// fuel can still be closed. The host side is reclaimed even when
    /// `frame_end` traps; the trap is returned afterwards.
    pub fn end_frame(&mut self) -> Result<(), SandboxError> {
        self.store.set_fuel(self.fuel_limit)?;
        let checkpoint = self.call_frame_end();
        if let Err(e) = &checkpoint {
            warn!(error = %e, "guest frame_end failed");
        }

        let used = self.store.data().host_alloc.used_range();
        self.memory.data_mut(&mut self.store)[used.clone()].fill(0);
        let state = self.store.data_mut();
        state.host_alloc.reset();
        state.inputs.end_frame();
        self.store.set_fuel(self.fuel_limit)?;

        debug!(reclaimed = used.len(), "frame ended");
        checkpoint
    }

    fn call_frame_end(&mut self) -> Result<(), SandboxError> {
        let Some(frame_end) = self.instance.get_func(&mut self.store, FRAME_END_EXPORT) else {
            return Ok(());
        };
        let frame_end = frame_end.typed::<(), ()>(&self.store)?;
        handle_trap(frame_end.call(&mut self.store, ()))
    }

    /// Boundary call counters since the session started.
    pub fn stats(&self) -> &CallStats {
        &self.store.data().stats
    }

    /// Input devices, e.g. to press keys between frames.
    pub fn inputs_mut(&mut self) -> &mut InputTable {
        &mut self.store.data_mut().inputs
    }

    pub fn strategy(&self) -> CodecStrategy {
        self.store.data().strategy
    }

    /// Fuel left in the current frame.
    pub fn fuel_remaining(&self) -> Result<u64, SandboxError> {
        Ok(self.store.get_fuel()?)
    }
}

/// Create a Wasmtime engine with deterministic configuration.
fn create_engine() -> Result<Engine, SandboxError> {
    let mut wasm_config = Config::new();

    // Fuel metering: prevents infinite loops
    wasm_config.consume_fuel(true);

    // Determinism enforcement
    wasm_config.wasm_threads(false);
    wasm_config.wasm_simd(false);
    wasm_config.wasm_relaxed_simd(false);
    wasm_config.wasm_multi_memory(false);
    wasm_config.cranelift_nan_canonicalization(true);

    Ok(Engine::new(&wasm_config)?)
}

/// Handle a guest function call result, converting traps to SandboxError.
///
/// Fuel exhaustion → `SandboxError::FuelExhausted`
/// Other traps → `SandboxError::GuestTrapped`
fn handle_trap<R>(result: Result<R, anyhow::Error>) -> Result<R, SandboxError> {
    result.map_err(|e| match e.downcast_ref::<Trap>() {
        Some(Trap::OutOfFuel) => SandboxError::FuelExhausted,
        _ => SandboxError::GuestTrapped(format!("{:#}", e)),
    })
}
