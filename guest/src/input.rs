//! Input queries.
//!
//! The host owns the input devices; the guest only forwards an opaque
//! reference and a key code and trusts the boolean that comes back.

use glam_bridge_schema::{InputRef, KeyCode, TRIGGER_KEY};

use crate::abi::InputAbi;

/// A key code bound to one set of input queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBinding {
    pub code: KeyCode,
}

impl InputBinding {
    pub const fn new(code: KeyCode) -> Self {
        Self { code }
    }

    pub fn just_pressed<A: InputAbi + ?Sized>(&self, abi: &A, inp: InputRef) -> bool {
        abi.just_pressed(inp, self.code)
    }

    pub fn just_released<A: InputAbi + ?Sized>(&self, abi: &A, inp: InputRef) -> bool {
        abi.just_released(inp, self.code)
    }

    pub fn pressed<A: InputAbi + ?Sized>(&self, abi: &A, inp: InputRef) -> bool {
        abi.pressed(inp, self.code)
    }
}

impl Default for InputBinding {
    fn default() -> Self {
        Self::new(TRIGGER_KEY)
    }
}

/// Was the trigger key pressed this frame on `inp`.
pub fn just_pressed<A: InputAbi + ?Sized>(abi: &A, inp: InputRef) -> bool {
    InputBinding::default().just_pressed(abi, inp)
}

/// Was the trigger key released this frame on `inp`.
pub fn just_released<A: InputAbi + ?Sized>(abi: &A, inp: InputRef) -> bool {
    InputBinding::default().just_released(abi, inp)
}
