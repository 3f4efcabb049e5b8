//! Host API traits: what the sandbox calls after decoding guest arguments.
//!
//! These work with decoded records and key codes, never raw addresses.

use glam_bridge_schema::{KeyCode, QuatRecord, Vec3Record};

/// Vector math served to the guest.
///
/// Implementations are pure: the same inputs give the same output, and
/// nothing fails once the records have been decoded.
pub trait MathApi {
    /// The forward axis `(0, 0, 1)`.
    fn unit_z(&self) -> Vec3Record;

    /// `v` scaled to unit length. The zero vector maps to `(0, 0, 0)`.
    fn normalize(&self, v: Vec3Record) -> Vec3Record;

    /// `v` rotated by `q`.
    fn mul_vec3(&self, q: QuatRecord, v: Vec3Record) -> Vec3Record;
}

/// Key state of one input device.
///
/// The host feeds key events in with `press`/`release`; the guest only
/// observes them through the queries.
pub trait InputDevice {
    /// Key goes down.
    fn press(&mut self, code: KeyCode);

    /// Key goes up.
    fn release(&mut self, code: KeyCode);

    /// `code` went down during the current frame.
    fn just_pressed(&self, code: KeyCode) -> bool;

    /// `code` went up during the current frame.
    fn just_released(&self, code: KeyCode) -> bool;

    /// `code` is currently held.
    fn pressed(&self, code: KeyCode) -> bool;

    /// Frame checkpoint. Clears the per-frame edges.
    fn end_frame(&mut self) {}
}

/// One of the input functions the guest can import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputQuery {
    JustPressed,
    JustReleased,
    Pressed,
}

impl InputQuery {
    pub const ALL: [Self; 3] = [Self::JustPressed, Self::JustReleased, Self::Pressed];

    /// Import name under the `wasm_input` module.
    pub fn name(self) -> &'static str {
        match self {
            Self::JustPressed => "just_pressed",
            Self::JustReleased => "just_released",
            Self::Pressed => "pressed",
        }
    }

    pub fn ask(self, device: &dyn InputDevice, code: KeyCode) -> bool {
        match self {
            Self::JustPressed => device.just_pressed(code),
            Self::JustReleased => device.just_released(code),
            Self::Pressed => device.pressed(code),
        }
    }
}
