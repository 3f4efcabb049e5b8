//! Input handle table.
//!
//! The guest names devices by opaque `InputRef` handles. The table resolves
//! them; an unknown handle answers `false` to every query.

use std::collections::BTreeMap;

use glam_bridge_schema::{InputRef, KeyCode};
use tracing::debug;

use crate::traits::{InputDevice, InputQuery};

#[derive(Default)]
pub struct InputTable {
    devices: BTreeMap<InputRef, Box<dyn InputDevice + Send>>,
    next: u32,
}

impl InputTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device and return the handle the guest will use for it.
    pub fn insert(&mut self, device: impl InputDevice + Send + 'static) -> InputRef {
        let handle = InputRef(self.next);
        self.next += 1;
        self.devices.insert(handle, Box::new(device));
        handle
    }

    pub fn get(&self, handle: InputRef) -> Option<&(dyn InputDevice + Send)> {
        self.devices.get(&handle).map(|d| d.as_ref())
    }

    pub fn get_mut(&mut self, handle: InputRef) -> Option<&mut (dyn InputDevice + Send + 'static)> {
        self.devices.get_mut(&handle).map(|d| d.as_mut())
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Answer one input query from the guest.
    pub fn query(&self, query: InputQuery, handle: InputRef, code: KeyCode) -> bool {
        match self.devices.get(&handle) {
            Some(device) => query.ask(device.as_ref(), code),
            None => {
                debug!(input = handle.0, %code, query = query.name(), "unknown input handle");
                false
            }
        }
    }

    /// Frame checkpoint for every device.
    pub fn end_frame(&mut self) {
        for device in self.devices.values_mut() {
            device.end_frame();
        }
    }
}

impl std::fmt::Debug for InputTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputTable")
            .field("devices", &self.devices.keys().collect::<Vec<_>>())
            .finish()
    }
}
