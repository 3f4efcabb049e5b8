//! Host function registration via Wasmtime linker.
//!
//! Registers the bound strategy's three math functions and the `wasm_input`
//! query functions. Each math function:
//! 1. Extracts memory and HostState from the Caller
//! 2. Validates and decodes every input record
//! 3. Computes the result through `MathApi`
//! 4. Validates the output range (or reserves it in the host region)
//! 5. Writes the output record, the only write of the call
//!
//! Failures write nothing and answer `missing_memory` (GuestAllocates) or
//! the null address (HostAllocates).

use tracing::{debug, warn};
use wasmtime::{Caller, Linker, Memory};

use glam_bridge_hostapi::{HostError, InputQuery, MathApi};
use glam_bridge_schema::{
    BoundaryAddress, CodecStrategy, Errno, InputRef, KeyCode, QuatRecord, Record, Vec3Record,
    INPUT_MODULE,
};

use crate::error::SandboxError;
use crate::host_impl::HostState;
use crate::memory;

/// Get the guest's exported memory from a Caller.
fn get_memory(caller: &mut Caller<'_, HostState>) -> Option<Memory> {
    caller.get_export("memory").and_then(|e| e.into_memory())
}

/// Register every boundary function for `strategy` with the linker.
pub fn register_host_functions(
    linker: &mut Linker<HostState>,
    strategy: CodecStrategy,
) -> Result<(), SandboxError> {
    match strategy {
        CodecStrategy::GuestAllocates => register_guest_allocates(linker)?,
        CodecStrategy::HostAllocates => register_host_allocates(linker)?,
    }
    register_input(linker)?;
    Ok(())
}

// ── Math ──

#[derive(Debug, Clone, Copy)]
enum MathOp {
    UnitZ,
    Normalize,
    MulVec3,
}

impl MathOp {
    fn name(self) -> &'static str {
        match self {
            Self::UnitZ => "unit_z",
            Self::Normalize => "normalize",
            Self::MulVec3 => "mul_vec3",
        }
    }

    /// Decode the input records at `args` and compute the output.
    fn eval(
        self,
        math: &dyn MathApi,
        mem: &[u8],
        args: &[BoundaryAddress],
    ) -> Result<Vec3Record, HostError> {
        match (self, args) {
            (Self::UnitZ, []) => Ok(math.unit_z()),
            (Self::Normalize, [v]) => {
                let v: Vec3Record = memory::read_record(mem, *v)?;
                Ok(math.normalize(v))
            }
            (Self::MulVec3, [q, v]) => {
                let q: QuatRecord = memory::read_record(mem, *q)?;
                let v: Vec3Record = memory::read_record(mem, *v)?;
                Ok(math.mul_vec3(q, v))
            }
            _ => Err(HostError::Internal(format!(
                "{} called with {} arguments",
                self.name(),
                args.len()
            ))),
        }
    }
}

/// GuestAllocates: compute, then write into the guest's `out` buffer.
fn write_to_guest(
    caller: &mut Caller<'_, HostState>,
    op: MathOp,
    args: &[BoundaryAddress],
    out: BoundaryAddress,
) -> Result<(), HostError> {
    let mem = get_memory(caller).ok_or(HostError::NoMemoryExport)?;
    let value = op.eval(caller.data().math.as_ref(), mem.data(&*caller), args)?;
    memory::write_record(mem.data_mut(&mut *caller), out, &value)
}

/// HostAllocates: compute, reserve a record in the host region, write it.
fn write_to_host_region(
    caller: &mut Caller<'_, HostState>,
    op: MathOp,
    args: &[BoundaryAddress],
) -> Result<BoundaryAddress, HostError> {
    let mem = get_memory(caller).ok_or(HostError::NoMemoryExport)?;
    let value = op.eval(caller.data().math.as_ref(), mem.data(&*caller), args)?;
    let (addr, new_bump) = caller.data().host_alloc.compute_alloc(Vec3Record::SIZE)?;
    memory::write_record(mem.data_mut(&mut *caller), addr, &value)?;
    caller.data_mut().host_alloc.commit(new_bump);
    Ok(addr)
}

fn guest_allocates_call(
    mut caller: Caller<'_, HostState>,
    op: MathOp,
    args: &[BoundaryAddress],
    out: BoundaryAddress,
) -> i32 {
    let result = write_to_guest(&mut caller, op, args, out);
    caller.data_mut().stats.record(op.name(), result.is_ok());
    match result {
        Ok(()) => {
            debug!(function = op.name(), ?args, %out, "ok");
            Errno::Ok.as_i32()
        }
        Err(e) => {
            warn!(function = op.name(), ?args, %out, error = %e, "missing_memory");
            e.to_error_code()
        }
    }
}

fn host_allocates_call(
    mut caller: Caller<'_, HostState>,
    op: MathOp,
    args: &[BoundaryAddress],
) -> i32 {
    let result = write_to_host_region(&mut caller, op, args);
    caller.data_mut().stats.record(op.name(), result.is_ok());
    match result {
        Ok(addr) => {
            debug!(function = op.name(), ?args, %addr, "ok");
            addr.as_i32()
        }
        Err(e) => {
            warn!(function = op.name(), ?args, error = %e, "missing_memory, returning null");
            BoundaryAddress::NULL.as_i32()
        }
    }
}

fn register_guest_allocates(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    let module = CodecStrategy::GuestAllocates.import_module();

    linker.func_wrap(module, "unit_z", |caller: Caller<'_, HostState>, out: i32| -> i32 {
        guest_allocates_call(caller, MathOp::UnitZ, &[], BoundaryAddress::from_i32(out))
    })?;

    linker.func_wrap(
        module,
        "normalize",
        |caller: Caller<'_, HostState>, input: i32, out: i32| -> i32 {
            let args = [BoundaryAddress::from_i32(input)];
            guest_allocates_call(caller, MathOp::Normalize, &args, BoundaryAddress::from_i32(out))
        },
    )?;

    linker.func_wrap(
        module,
        "mul_vec3",
        |caller: Caller<'_, HostState>, q: i32, v: i32, out: i32| -> i32 {
            let args = [BoundaryAddress::from_i32(q), BoundaryAddress::from_i32(v)];
            guest_allocates_call(caller, MathOp::MulVec3, &args, BoundaryAddress::from_i32(out))
        },
    )?;

    Ok(())
}

fn register_host_allocates(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    let module = CodecStrategy::HostAllocates.import_module();

    linker.func_wrap(module, "unit_z", |caller: Caller<'_, HostState>| -> i32 {
        host_allocates_call(caller, MathOp::UnitZ, &[])
    })?;

    linker.func_wrap(module, "normalize", |caller: Caller<'_, HostState>, input: i32| -> i32 {
        host_allocates_call(caller, MathOp::Normalize, &[BoundaryAddress::from_i32(input)])
    })?;

    linker.func_wrap(
        module,
        "mul_vec3",
        |caller: Caller<'_, HostState>, q: i32, v: i32| -> i32 {
            let args = [BoundaryAddress::from_i32(q), BoundaryAddress::from_i32(v)];
            host_allocates_call(caller, MathOp::MulVec3, &args)
        },
    )?;

    Ok(())
}

// ── Input ──

fn register_input(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    for query in InputQuery::ALL {
        linker.func_wrap(
            INPUT_MODULE,
            query.name(),
            move |mut caller: Caller<'_, HostState>, input: i32, code: i32| -> i32 {
                let input = InputRef::from_i32(input);
                let code = KeyCode(code as u32);
                let answer = caller.data().inputs.query(query, input, code);
                caller.data_mut().stats.record(query.name(), true);
                debug!(function = query.name(), input = input.0, %code, answer, "ok");
                i32::from(answer)
            },
        )?;
    }
    Ok(())
}
