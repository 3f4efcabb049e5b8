//! Boundary function signatures and the codec strategy they are bound with.
//!
//! Math functions have two physical encodings depending on who allocates the
//! output record. A deployment picks exactly one [`CodecStrategy`]; the two
//! bindings live under different import modules so a guest compiled for one
//! cannot link against a host serving the other.

use crate::layout::{RecordLayout, QUAT_LAYOUT, VEC3_LAYOUT};

/// Who allocates the output record of a math call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CodecStrategy {
    /// The guest allocates the output record and passes its address as the
    /// last argument; the host writes into it and returns an errno tag.
    #[default]
    GuestAllocates,
    /// The host allocates the output record inside guest memory, writes it,
    /// and returns its address. A null address means `missing_memory`.
    HostAllocates,
}

impl CodecStrategy {
    /// Import module name the math functions are linked under.
    pub const fn import_module(self) -> &'static str {
        match self {
            Self::GuestAllocates => "wasm_glam",
            Self::HostAllocates => "wasm_glam_host",
        }
    }

    /// The other binding. Used to detect modules that mix the two.
    pub const fn other(self) -> Self {
        match self {
            Self::GuestAllocates => Self::HostAllocates,
            Self::HostAllocates => Self::GuestAllocates,
        }
    }
}

/// Import module for the input query functions.
pub const INPUT_MODULE: &str = "wasm_input";

/// How a function reports its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// A record result. Encoded per [`CodecStrategy`]: errno + out pointer
    /// for `GuestAllocates`, address-or-null for `HostAllocates`.
    Record,
    /// A boolean, `0` or `1`. No error cases.
    Bool,
}

/// Signature of one boundary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSig {
    pub name: &'static str,
    /// Scalar arguments passed by value (input handles, key codes).
    pub scalar_args: usize,
    /// Record arguments, each passed as an address.
    pub inputs: &'static [&'static RecordLayout],
    pub output: Option<&'static RecordLayout>,
    pub result: ResultShape,
}

impl FunctionSig {
    /// Number of `i32` parameters of the wasm import under `strategy`.
    pub const fn wasm_params(&self, strategy: CodecStrategy) -> usize {
        let base = self.scalar_args + self.inputs.len();
        match (self.result, strategy) {
            (ResultShape::Record, CodecStrategy::GuestAllocates) => base + 1,
            _ => base,
        }
    }

    /// Number of `i32` results of the wasm import. Always one: an errno, an
    /// address, or a boolean.
    pub const fn wasm_results(&self) -> usize {
        1
    }

    /// Bytes the output record occupies, if any.
    pub fn output_size(&self) -> usize {
        self.output.map(|l| l.size).unwrap_or(0)
    }
}

/// Math functions served under [`CodecStrategy::import_module`].
pub const MATH_FUNCTIONS: &[FunctionSig] = &[
    FunctionSig {
        name: "unit_z",
        scalar_args: 0,
        inputs: &[],
        output: Some(&VEC3_LAYOUT),
        result: ResultShape::Record,
    },
    FunctionSig {
        name: "normalize",
        scalar_args: 0,
        inputs: &[&VEC3_LAYOUT],
        output: Some(&VEC3_LAYOUT),
        result: ResultShape::Record,
    },
    FunctionSig {
        name: "mul_vec3",
        scalar_args: 0,
        inputs: &[&QUAT_LAYOUT, &VEC3_LAYOUT],
        output: Some(&VEC3_LAYOUT),
        result: ResultShape::Record,
    },
];

/// Input query functions served under [`INPUT_MODULE`].
pub const INPUT_FUNCTIONS: &[FunctionSig] = &[
    FunctionSig {
        name: "just_pressed",
        scalar_args: 2,
        inputs: &[],
        output: None,
        result: ResultShape::Bool,
    },
    FunctionSig {
        name: "just_released",
        scalar_args: 2,
        inputs: &[],
        output: None,
        result: ResultShape::Bool,
    },
    FunctionSig {
        name: "pressed",
        scalar_args: 2,
        inputs: &[],
        output: None,
        result: ResultShape::Bool,
    },
];

/// Find a function in the tables of a given import module.
pub fn lookup(strategy: CodecStrategy, module: &str, name: &str) -> Option<&'static FunctionSig> {
    let table = if module == strategy.import_module() {
        MATH_FUNCTIONS
    } else if module == INPUT_MODULE {
        INPUT_FUNCTIONS
    } else {
        return None;
    };
    table.iter().find(|sig| sig.name == name)
}
