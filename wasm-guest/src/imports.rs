//! Host function imports.
//!
//! Every parameter and result is an `i32`: addresses, input references, key
//! codes, errno tags and booleans. Exactly one of the two math bindings is
//! compiled in.

#[cfg(not(feature = "host-allocates"))]
#[link(wasm_import_module = "wasm_glam")]
extern "C" {
    // ── Math, guest allocates (returns errno) ──

    /// Write `(0, 0, 1)` to the Vec3 at `out`.
    pub fn unit_z(out: i32) -> i32;

    /// Write the normalized Vec3 at `input` to `out`.
    pub fn normalize(input: i32, out: i32) -> i32;

    /// Write the Vec3 at `v` rotated by the Quat at `q` to `out`.
    pub fn mul_vec3(q: i32, v: i32, out: i32) -> i32;
}

#[cfg(feature = "host-allocates")]
#[link(wasm_import_module = "wasm_glam_host")]
extern "C" {
    // ── Math, host allocates (returns address, 0 on failure) ──

    pub fn unit_z() -> i32;

    pub fn normalize(input: i32) -> i32;

    pub fn mul_vec3(q: i32, v: i32) -> i32;
}

#[link(wasm_import_module = "wasm_input")]
extern "C" {
    // ── Input queries (returns 0 or 1) ──

    pub fn just_pressed(input: i32, code: i32) -> i32;

    pub fn just_released(input: i32, code: i32) -> i32;

    pub fn pressed(input: i32, code: i32) -> i32;
}
