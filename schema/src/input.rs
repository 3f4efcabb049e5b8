//! Input query identifiers.

use core::fmt;

/// Opaque reference to a host input device, handed to the guest by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct InputRef(pub u32);

impl InputRef {
    pub const fn from_i32(raw: i32) -> Self {
        Self(raw as u32)
    }

    pub const fn as_i32(self) -> i32 {
        self.0 as i32
    }
}

/// Index into the host's key table.
///
/// The table numbers the digit row first (`Key1`..`Key0` = 0..9), then the
/// letters (`A`..`Z` = 10..35), then `Escape`, the function keys and the
/// navigation block. Only the codes the guest binds to are named here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const KEY1: Self = Self(0);
    pub const KEY0: Self = Self(9);
    pub const A: Self = Self(10);
    pub const D: Self = Self(13);
    pub const S: Self = Self(28);
    pub const W: Self = Self(32);
    pub const Y: Self = Self(34);
    pub const Z: Self = Self(35);
    pub const SPACE: Self = Self(76);
    pub const LSHIFT: Self = Self(114);

    pub const fn code(self) -> u32 {
        self.0
    }

    pub const fn as_i32(self) -> i32 {
        self.0 as i32
    }

    /// Letter for codes in the `A`..`Z` range.
    pub fn letter(self) -> Option<char> {
        if (Self::A.0..=Self::Z.0).contains(&self.0) {
            char::from_u32(u32::from(b'A') + (self.0 - Self::A.0))
        } else {
            None
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter() {
            Some(c) => write!(f, "{}", c),
            None => write!(f, "key#{}", self.0),
        }
    }
}

/// The key the guest's trigger queries are bound to.
///
/// `just_pressed(inp)` and `just_released(inp)` on the guest always forward
/// this code.
pub const TRIGGER_KEY: KeyCode = KeyCode::Y;

const _: () = assert!(TRIGGER_KEY.0 == 34);
