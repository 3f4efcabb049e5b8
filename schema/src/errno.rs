//! Boundary status tags.
//!
//! Every fallible boundary function reports its outcome as a `u32` tag.
//! `0` is success and is never reassigned; new tags are only ever appended.

use core::fmt;

/// Status tag returned by fallible boundary functions.
///
/// These repr values are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Errno {
    Ok = 0,
    /// A required guest address was null, out of range, or otherwise not
    /// accessible to the host.
    MissingMemory = 1,
}

impl Errno {
    /// Decode a raw tag. Unknown tags return `None`.
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::MissingMemory),
            _ => None,
        }
    }

    /// Decode the `i32` a wasm function actually returns.
    pub fn from_i32(code: i32) -> Option<Self> {
        Self::from_u32(code as u32)
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// The value handed back to the guest from a host function.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Schema name of the tag.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::MissingMemory => "missing_memory",
        }
    }

    /// Turn a tag into a `BoundaryResult`, treating `Ok` as success.
    pub fn into_result(self) -> BoundaryResult<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Errno {}

/// Result of a boundary call: the decoded value or the failing tag.
pub type BoundaryResult<T> = core::result::Result<T, Errno>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_repr_values() {
        assert_eq!(Errno::Ok as u32, 0);
        assert_eq!(Errno::MissingMemory as u32, 1);
    }

    #[test]
    fn test_from_u32() {
        assert_eq!(Errno::from_u32(0), Some(Errno::Ok));
        assert_eq!(Errno::from_u32(1), Some(Errno::MissingMemory));
        assert_eq!(Errno::from_u32(2), None);
        assert_eq!(Errno::from_u32(u32::MAX), None);
    }

    #[test]
    fn test_from_i32_negative_is_unknown() {
        assert_eq!(Errno::from_i32(-1), None);
        assert_eq!(Errno::from_i32(1), Some(Errno::MissingMemory));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Errno::Ok.into_result(), Ok(()));
        assert_eq!(Errno::MissingMemory.into_result(), Err(Errno::MissingMemory));
    }

    #[test]
    fn test_display_uses_schema_names() {
        assert_eq!(format!("{}", Errno::Ok), "ok");
        assert_eq!(format!("{}", Errno::MissingMemory), "missing_memory");
    }
}
