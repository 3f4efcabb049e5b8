//! In-memory input device for tests and headless hosts.
//!
//! `MemInput` tracks held keys plus the keys that changed state since the
//! last frame checkpoint, so `just_pressed`/`just_released` fire once per
//! transition.

use std::collections::BTreeSet;

use glam_bridge_schema::KeyCode;

use crate::traits::InputDevice;

#[derive(Debug, Clone, Default)]
pub struct MemInput {
    held: BTreeSet<KeyCode>,
    went_down: BTreeSet<KeyCode>,
    went_up: BTreeSet<KeyCode>,
}

impl MemInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently held, in code order.
    pub fn held(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.held.iter().copied()
    }
}

impl InputDevice for MemInput {
    /// Pressing a held key is not a new edge.
    fn press(&mut self, code: KeyCode) {
        if self.held.insert(code) {
            self.went_down.insert(code);
        }
    }

    /// Releasing a key that is not held is ignored.
    fn release(&mut self, code: KeyCode) {
        if self.held.remove(&code) {
            self.went_up.insert(code);
        }
    }

    fn just_pressed(&self, code: KeyCode) -> bool {
        self.went_down.contains(&code)
    }

    fn just_released(&self, code: KeyCode) -> bool {
        self.went_up.contains(&code)
    }

    fn pressed(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    fn end_frame(&mut self) {
        self.went_down.clear();
        self.went_up.clear();
    }
}
