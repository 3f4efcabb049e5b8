//! Addresses into guest linear memory.

use core::fmt;

/// An offset into guest-owned linear memory.
///
/// Only meaningful inside the guest instance that produced it and only while
/// the buffer it denotes is live. Address `0` is the null address: it never
/// denotes a record and doubles as the failure value of host-allocated
/// results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BoundaryAddress(u32);

impl BoundaryAddress {
    pub const NULL: Self = Self(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Reinterpret the `i32` a wasm function passes or returns.
    pub const fn from_i32(raw: i32) -> Self {
        Self(raw as u32)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn as_i32(self) -> i32 {
        self.0 as i32
    }

    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Address of a field `offset` bytes into the record at `self`.
    ///
    /// Returns `None` on overflow of the 32-bit address space.
    pub fn offset(self, offset: u32) -> Option<Self> {
        self.0.checked_add(offset).map(Self)
    }

    /// End (exclusive) of a `len`-byte range starting here.
    pub fn end(self, len: usize) -> Option<usize> {
        self.as_usize().checked_add(len)
    }
}

impl fmt::Display for BoundaryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
