//! WASM module validation: schema binding checks.
//!
//! Validates that a compiled WASM module can be served under the configured
//! codec strategy before it is instantiated. Checks:
//!
//! 1. Memory export present
//! 2. Optional `frame_end` export has no params and no results
//! 3. No WASI imports
//! 4. No imports from the other strategy's math module (mixed binding)
//! 5. All imports are functions from the bound math module or `wasm_input`
//! 6. Every import matches its schema signature (all `i32`)

use glam_bridge_schema::signature::lookup;
use glam_bridge_schema::{CodecStrategy, INPUT_MODULE};
use wasmtime::{ExternType, FuncType, Module, ValType};

use crate::error::SandboxError;

/// Optional frame checkpoint export.
pub const FRAME_END_EXPORT: &str = "frame_end";

/// Check if a ValType is i32.
fn is_i32(vt: &ValType) -> bool {
    matches!(vt, ValType::I32)
}

/// Validate that a WASM module fits the `strategy` binding.
pub fn validate_module(module: &Module, strategy: CodecStrategy) -> Result<(), SandboxError> {
    validate_exports(module)?;
    validate_imports(module, strategy)?;
    Ok(())
}

fn validate_exports(module: &Module) -> Result<(), SandboxError> {
    let has_memory = module
        .exports()
        .any(|e| e.name() == "memory" && matches!(e.ty(), ExternType::Memory(_)));
    if !has_memory {
        return Err(SandboxError::InvalidModule(
            "module must export 'memory'".into(),
        ));
    }

    if let Some(export) = module.exports().find(|e| e.name() == FRAME_END_EXPORT) {
        let ok = match export.ty() {
            ExternType::Func(ft) => ft.params().len() == 0 && ft.results().len() == 0,
            _ => false,
        };
        if !ok {
            return Err(SandboxError::InvalidModule(format!(
                "export '{}' must be a function with no params and no results",
                FRAME_END_EXPORT
            )));
        }
    }

    Ok(())
}

fn validate_imports(module: &Module, strategy: CodecStrategy) -> Result<(), SandboxError> {
    let bound = strategy.import_module();
    let other = strategy.other().import_module();

    for import in module.imports() {
        let module_name = import.module();
        let name = import.name();

        // Reject WASI imports
        if module_name.starts_with("wasi") {
            return Err(SandboxError::InvalidModule(format!(
                "WASI import not allowed: {}::{}",
                module_name, name
            )));
        }

        if module_name == other {
            return Err(SandboxError::MixedBinding {
                module: module_name.to_string(),
                name: name.to_string(),
                bound: strategy,
                found: strategy.other(),
            });
        }

        if module_name != bound && module_name != INPUT_MODULE {
            return Err(SandboxError::InvalidModule(format!(
                "import from unknown module '{}' (only '{}' and '{}' allowed): {}",
                module_name, bound, INPUT_MODULE, name
            )));
        }

        let func_ty = match import.ty() {
            ExternType::Func(ft) => ft,
            _ => {
                return Err(SandboxError::InvalidModule(format!(
                    "non-function import not allowed: {}::{}",
                    module_name, name
                )));
            }
        };

        let sig = lookup(strategy, module_name, name).ok_or_else(|| {
            SandboxError::InvalidModule(format!(
                "unknown function: {}::{}",
                module_name, name
            ))
        })?;

        check_signature(
            &func_ty,
            module_name,
            name,
            sig.wasm_params(strategy),
            sig.wasm_results(),
        )?;
    }

    Ok(())
}

fn check_signature(
    func_ty: &FuncType,
    module_name: &str,
    name: &str,
    expected_params: usize,
    expected_results: usize,
) -> Result<(), SandboxError> {
    let params: Vec<ValType> = func_ty.params().collect();
    let results: Vec<ValType> = func_ty.results().collect();

    if params.len() != expected_params || !params.iter().all(is_i32) {
        return Err(SandboxError::InvalidModule(format!(
            "import '{}::{}' has wrong param signature: expected {} i32 params, got {} params",
            module_name,
            name,
            expected_params,
            params.len()
        )));
    }

    if results.len() != expected_results || !results.iter().all(is_i32) {
        return Err(SandboxError::InvalidModule(format!(
            "import '{}::{}' has wrong result signature: expected {} i32 results, got {} results",
            module_name,
            name,
            expected_results,
            results.len()
        )));
    }

    Ok(())
}
