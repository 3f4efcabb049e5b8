//! Shared test helpers for integration tests.
//!
//! Provides WAT guests for both bindings, loaders for the built Rust guest
//! artifacts, sandbox and session factories, and record assertions used
//! across all integration test files.

#![allow(dead_code)]

use std::path::Path;

use glam_bridge_hostapi::{GlamMath, InputDevice, InputTable, MemInput};
use glam_bridge_sandbox::{GuestSession, Sandbox, SandboxConfig};
use glam_bridge_schema::{CodecStrategy, InputRef, KeyCode, Vec3Record};

/// Scratch offsets the WAT guests use for their own records.
pub const GUEST_QUAT: i32 = 256;
pub const GUEST_AXIS: i32 = 272;
pub const GUEST_FORWARD: i32 = 288;

// ── WAT guests ──

/// GuestAllocates guest: forwards addresses straight to the imports and
/// implements `camera_forward` over fixed scratch offsets.
pub const GUEST_ALLOCATES_WAT: &str = r#"
(module
    (import "wasm_glam" "unit_z" (func $unit_z (param i32) (result i32)))
    (import "wasm_glam" "normalize" (func $normalize (param i32 i32) (result i32)))
    (import "wasm_glam" "mul_vec3" (func $mul_vec3 (param i32 i32 i32) (result i32)))
    (import "wasm_input" "just_pressed" (func $just_pressed (param i32 i32) (result i32)))
    (import "wasm_input" "just_released" (func $just_released (param i32 i32) (result i32)))
    (import "wasm_input" "pressed" (func $pressed (param i32 i32) (result i32)))
    (memory (export "memory") 1)
    (global $frames (mut i32) (i32.const 0))

    (func (export "call_unit_z") (param $out i32) (result i32)
        (call $unit_z (local.get $out)))
    (func (export "call_normalize") (param $in i32) (param $out i32) (result i32)
        (call $normalize (local.get $in) (local.get $out)))
    (func (export "call_mul_vec3") (param $q i32) (param $v i32) (param $out i32) (result i32)
        (call $mul_vec3 (local.get $q) (local.get $v) (local.get $out)))

    (func (export "camera_forward")
        (param $qx f32) (param $qy f32) (param $qz f32) (param $qw f32) (param $out i32)
        (result i32)
        (local $status i32)
        (f32.store (i32.const 256) (local.get $qx))
        (f32.store (i32.const 260) (local.get $qy))
        (f32.store (i32.const 264) (local.get $qz))
        (f32.store (i32.const 268) (local.get $qw))
        (local.set $status (call $unit_z (i32.const 272)))
        (if (local.get $status) (then (return (local.get $status))))
        (local.set $status (call $normalize (i32.const 272) (i32.const 288)))
        (if (local.get $status) (then (return (local.get $status))))
        (call $mul_vec3 (i32.const 256) (i32.const 288) (local.get $out)))

    (func (export "trigger_just_pressed") (param $inp i32) (result i32)
        (call $just_pressed (local.get $inp) (i32.const 34)))
    (func (export "trigger_just_released") (param $inp i32) (result i32)
        (call $just_released (local.get $inp) (i32.const 34)))
    (func (export "key_pressed") (param $inp i32) (param $code i32) (result i32)
        (call $pressed (local.get $inp) (local.get $code)))

    (func (export "frame_end")
        (global.set $frames (i32.add (global.get $frames) (i32.const 1))))
    (func (export "frames") (result i32)
        (global.get $frames))
    (func (export "spin")
        (loop $l (br $l)))
)
"#;

/// HostAllocates guest: forwards input addresses and returns whatever
/// address the host hands back.
pub const HOST_ALLOCATES_WAT: &str = r#"
(module
    (import "wasm_glam_host" "unit_z" (func $unit_z (result i32)))
    (import "wasm_glam_host" "normalize" (func $normalize (param i32) (result i32)))
    (import "wasm_glam_host" "mul_vec3" (func $mul_vec3 (param i32 i32) (result i32)))
    (import "wasm_input" "just_pressed" (func $just_pressed (param i32 i32) (result i32)))
    (memory (export "memory") 1)

    (func (export "call_unit_z") (result i32)
        (call $unit_z))
    (func (export "call_normalize") (param $in i32) (result i32)
        (call $normalize (local.get $in)))
    (func (export "call_mul_vec3") (param $q i32) (param $v i32) (result i32)
        (call $mul_vec3 (local.get $q) (local.get $v)))

    (func (export "camera_forward")
        (param $qx f32) (param $qy f32) (param $qz f32) (param $qw f32) (param $out i32)
        (result i32)
        (local $addr i32)
        (f32.store (i32.const 256) (local.get $qx))
        (f32.store (i32.const 260) (local.get $qy))
        (f32.store (i32.const 264) (local.get $qz))
        (f32.store (i32.const 268) (local.get $qw))
        (local.set $addr (call $unit_z))
        (if (i32.eqz (local.get $addr)) (then (return (i32.const 1))))
        (local.set $addr (call $normalize (local.get $addr)))
        (if (i32.eqz (local.get $addr)) (then (return (i32.const 1))))
        (local.set $addr (call $mul_vec3 (i32.const 256) (local.get $addr)))
        (if (i32.eqz (local.get $addr)) (then (return (i32.const 1))))
        (f32.store (local.get $out) (f32.load (local.get $addr)))
        (f32.store offset=4 (local.get $out) (f32.load offset=4 (local.get $addr)))
        (f32.store offset=8 (local.get $out) (f32.load offset=8 (local.get $addr)))
        (i32.const 0))

    (func (export "trigger_just_pressed") (param $inp i32) (result i32)
        (call $just_pressed (local.get $inp) (i32.const 34)))
)
"#;

// ── Rust guest artifacts ──

/// Default build of `wasm-guest` (GuestAllocates).
const GUEST_ALLOCATES_ARTIFACT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../target/wasm32-unknown-unknown/release/glam_bridge_wasm_guest.wasm"
);

/// `host-allocates` build of `wasm-guest`, kept in its own target dir so
/// both artifacts can exist side by side.
const HOST_ALLOCATES_ARTIFACT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../target/host-allocates/wasm32-unknown-unknown/release/glam_bridge_wasm_guest.wasm"
);

fn artifact_build_command(strategy: CodecStrategy) -> &'static str {
    match strategy {
        CodecStrategy::GuestAllocates => {
            "cargo build -p glam-bridge-wasm-guest --release --target wasm32-unknown-unknown"
        }
        CodecStrategy::HostAllocates => {
            "cargo build -p glam-bridge-wasm-guest --release --target wasm32-unknown-unknown \
             --features host-allocates --target-dir target/host-allocates"
        }
    }
}

/// Path of the built guest for `strategy`, or `None` (with a note on
/// stderr) when it has not been built.
pub fn guest_artifact(strategy: CodecStrategy) -> Option<&'static Path> {
    let path = Path::new(match strategy {
        CodecStrategy::GuestAllocates => GUEST_ALLOCATES_ARTIFACT,
        CodecStrategy::HostAllocates => HOST_ALLOCATES_ARTIFACT,
    });
    if path.exists() {
        Some(path)
    } else {
        eprintln!(
            "skipping {:?} artifact test: {:?} not found. Build with: {}",
            strategy,
            path,
            artifact_build_command(strategy)
        );
        None
    }
}

/// Load the built Rust guest for `strategy`, if present.
pub fn load_artifact(strategy: CodecStrategy) -> Option<Sandbox> {
    let path = guest_artifact(strategy)?;
    let sandbox = Sandbox::from_file(path, SandboxConfig::for_strategy(strategy))
        .unwrap_or_else(|e| panic!("failed to load {:?}: {}", path, e));
    Some(sandbox)
}

// ── Sandbox factories ──

pub fn wat_for(strategy: CodecStrategy) -> &'static str {
    match strategy {
        CodecStrategy::GuestAllocates => GUEST_ALLOCATES_WAT,
        CodecStrategy::HostAllocates => HOST_ALLOCATES_WAT,
    }
}

pub fn load_sandbox(strategy: CodecStrategy) -> Sandbox {
    load_sandbox_with_config(SandboxConfig::for_strategy(strategy))
}

pub fn load_sandbox_with_config(config: SandboxConfig) -> Sandbox {
    Sandbox::new(wat_for(config.strategy).as_bytes(), config).unwrap()
}

/// Session backed by `GlamMath` and no input devices.
pub fn session(strategy: CodecStrategy) -> GuestSession {
    load_sandbox(strategy)
        .instantiate(GlamMath, InputTable::new())
        .unwrap()
}

/// Session whose first input device (handle 0) has `pressed` just pressed.
pub fn session_with_keys(strategy: CodecStrategy, pressed: &[KeyCode]) -> (GuestSession, InputRef) {
    let mut device = MemInput::new();
    for &code in pressed {
        device.press(code);
    }
    let mut inputs = InputTable::new();
    let handle = inputs.insert(device);
    let session = load_sandbox(strategy).instantiate(GlamMath, inputs).unwrap();
    (session, handle)
}

// ── Assertions ──

pub fn assert_vec3_near(actual: Vec3Record, expected: Vec3Record, eps: f32) {
    assert!(
        (actual.x - expected.x).abs() <= eps
            && (actual.y - expected.y).abs() <= eps
            && (actual.z - expected.z).abs() <= eps,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
