//! Records and their byte codecs.
//!
//! Encoding is a plain little-endian copy of each field at its layout offset.
//! Decoding is the exact inverse, so a record survives a round trip bit for
//! bit (NaN payloads included).

use crate::layout::{RecordLayout, QUAT_LAYOUT, VEC3_LAYOUT};

/// Size of the largest record in the schema. Scratch buffers of this size
/// can hold any record.
pub const MAX_RECORD_SIZE: usize = 16;

/// A fixed-layout record that can cross the boundary.
pub trait Record: Sized + Copy {
    const LAYOUT: &'static RecordLayout;
    const SIZE: usize;

    /// Write the record into `out[..Self::SIZE]`.
    ///
    /// Panics if `out` is shorter than `Self::SIZE`.
    fn encode_into(&self, out: &mut [u8]);

    /// Read a record from `bytes[..Self::SIZE]`.
    ///
    /// Panics if `bytes` is shorter than `Self::SIZE`.
    fn decode(bytes: &[u8]) -> Self;
}

fn put_f32(out: &mut [u8], offset: usize, v: f32) {
    out[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
}

fn get_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// `vec3` record: a 3D vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vec3Record {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3Record {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_bytes(self) -> [u8; 12] {
        let mut out = [0u8; 12];
        self.encode_into(&mut out);
        out
    }

    /// Bitwise equality, distinguishing `-0.0` and NaN payloads.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Record for Vec3Record {
    const LAYOUT: &'static RecordLayout = &VEC3_LAYOUT;
    const SIZE: usize = 12;

    fn encode_into(&self, out: &mut [u8]) {
        put_f32(out, 0, self.x);
        put_f32(out, 4, self.y);
        put_f32(out, 8, self.z);
    }

    fn decode(bytes: &[u8]) -> Self {
        Self {
            x: get_f32(bytes, 0),
            y: get_f32(bytes, 4),
            z: get_f32(bytes, 8),
        }
    }
}

/// `quat` record: a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct QuatRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl QuatRecord {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn to_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        self.encode_into(&mut out);
        out
    }
}

impl Default for QuatRecord {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Record for QuatRecord {
    const LAYOUT: &'static RecordLayout = &QUAT_LAYOUT;
    const SIZE: usize = 16;

    fn encode_into(&self, out: &mut [u8]) {
        put_f32(out, 0, self.x);
        put_f32(out, 4, self.y);
        put_f32(out, 8, self.z);
        put_f32(out, 12, self.w);
    }

    fn decode(bytes: &[u8]) -> Self {
        Self {
            x: get_f32(bytes, 0),
            y: get_f32(bytes, 4),
            z: get_f32(bytes, 8),
            w: get_f32(bytes, 12),
        }
    }
}

const _: () = assert!(Vec3Record::SIZE == VEC3_LAYOUT.size);
const _: () = assert!(QuatRecord::SIZE == QUAT_LAYOUT.size);
const _: () = assert!(core::mem::size_of::<Vec3Record>() == Vec3Record::SIZE);
const _: () = assert!(core::mem::size_of::<QuatRecord>() == QuatRecord::SIZE);
const _: () = assert!(Vec3Record::SIZE <= MAX_RECORD_SIZE && QuatRecord::SIZE <= MAX_RECORD_SIZE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_wire_bytes() {
        let v = Vec3Record::new(1.0, -2.0, 0.5);
        let bytes = v.to_bytes();
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-2.0f32).to_le_bytes());
        assert_eq!(&bytes[8..12], &0.5f32.to_le_bytes());
    }

    #[test]
    fn test_quat_w_is_last() {
        let bytes = QuatRecord::IDENTITY.to_bytes();
        assert_eq!(&bytes[0..12], &[0u8; 12]);
        assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
    }

    #[test]
    fn test_decode_preserves_bits() {
        let odd = Vec3Record::new(-0.0, f32::from_bits(0x7FC0_0001), f32::MIN_POSITIVE);
        let back = Vec3Record::decode(&odd.to_bytes());
        assert!(back.bit_eq(&odd));
        assert_eq!(back.x.to_bits(), (-0.0f32).to_bits());
        assert_eq!(back.y.to_bits(), 0x7FC0_0001);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut buf = [0xAAu8; 20];
        Vec3Record::UNIT_Z.encode_into(&mut buf);
        assert_eq!(Vec3Record::decode(&buf), Vec3Record::UNIT_Z);
        assert_eq!(buf[12], 0xAA);
    }

    #[test]
    fn test_default_quat_is_identity() {
        assert_eq!(QuatRecord::default(), QuatRecord::IDENTITY);
    }
}
