//! Guest-side error type.

use core::fmt;

use glam_bridge_schema::Errno;

/// Error surfaced by the guest codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestError {
    /// The host (or the guest's own memory checks) reported a schema error.
    Boundary(Errno),
    /// The host returned a status tag this schema version does not know.
    UnknownErrno(u32),
    /// The scratch arena cannot fit the requested buffer.
    ///
    /// Fatal: not part of the wire taxonomy, never retried. The wasm exports
    /// trap on it.
    ArenaExhausted { requested: usize, remaining: usize },
}

impl GuestError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ArenaExhausted { .. })
    }

    /// The schema tag, when the error is a known boundary error.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Self::Boundary(e) => Some(*e),
            _ => None,
        }
    }
}

impl From<Errno> for GuestError {
    fn from(e: Errno) -> Self {
        Self::Boundary(e)
    }
}

impl fmt::Display for GuestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boundary(e) => write!(f, "boundary error: {}", e),
            Self::UnknownErrno(code) => write!(f, "unknown errno {}", code),
            Self::ArenaExhausted {
                requested,
                remaining,
            } => write!(
                f,
                "scratch arena exhausted: requested {} bytes, {} remaining",
                requested, remaining
            ),
        }
    }
}

/// Convenience result type for the guest codec.
pub type GuestResult<T> = core::result::Result<T, GuestError>;

/// Decode the `i32` status returned by a `GuestAllocates` math import.
pub fn check_status(raw: i32) -> GuestResult<()> {
    match Errno::from_i32(raw) {
        Some(Errno::Ok) => Ok(()),
        Some(e) => Err(GuestError::Boundary(e)),
        None => Err(GuestError::UnknownErrno(raw as u32)),
    }
}
