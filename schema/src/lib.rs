//! `glam-bridge-schema`: the interface schema shared by guest and host.
//!
//! Everything that crosses the guest/host boundary is declared here once:
//!
//! - `Errno`: the status tag returned by fallible boundary functions
//! - `BoundaryAddress`: an offset into guest linear memory
//! - `RecordLayout`: field names, scalar types and byte offsets of records
//! - `Vec3Record` / `QuatRecord`: the records and their byte codecs
//! - `FunctionSig`: per-function inputs, output and result shape
//! - `CodecStrategy`: which side allocates output records
//! - `KeyCode` / `InputRef`: input query identifiers
//!
//! Both codecs are written against these definitions. Changing a field order
//! or size here is a breaking change for every guest and host build.
//!
//! Supports `#![no_std]` for wasm guests (use `default-features = false`).

#![cfg_attr(not(feature = "std"), no_std)]

pub mod errno;
pub mod address;
pub mod layout;
pub mod records;
pub mod signature;
pub mod input;

pub use errno::{BoundaryResult, Errno};
pub use address::BoundaryAddress;
pub use layout::{Field, RecordLayout, Scalar, ScalarType, QUAT_LAYOUT, VEC3_LAYOUT};
pub use records::{QuatRecord, Record, Vec3Record, MAX_RECORD_SIZE};
pub use signature::{
    CodecStrategy, FunctionSig, ResultShape, INPUT_FUNCTIONS, INPUT_MODULE, MATH_FUNCTIONS,
};
pub use input::{InputRef, KeyCode, TRIGGER_KEY};
