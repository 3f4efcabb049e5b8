//! Record layouts.
//!
//! A record is a flat run of 4-byte scalars. Field offsets are the cumulative
//! size of the preceding fields, with no padding. The layouts below are the
//! only valid interpretation of the bytes at a record address.

/// Scalar types that can appear in a record or be accessed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    F32,
    U32,
    /// A wasm32 address.
    Pointer,
}

impl ScalarType {
    /// Width in bytes on the wire.
    pub const fn size(self) -> usize {
        match self {
            Self::F32 | Self::U32 | Self::Pointer => 4,
        }
    }
}

/// A decoded scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    F32(f32),
    U32(u32),
    Pointer(u32),
}

impl Scalar {
    pub const fn ty(&self) -> ScalarType {
        match self {
            Self::F32(_) => ScalarType::F32,
            Self::U32(_) => ScalarType::U32,
            Self::Pointer(_) => ScalarType::Pointer,
        }
    }

    /// Little-endian wire bytes.
    pub fn to_le_bytes(self) -> [u8; 4] {
        match self {
            Self::F32(v) => v.to_le_bytes(),
            Self::U32(v) | Self::Pointer(v) => v.to_le_bytes(),
        }
    }

    pub fn from_le_bytes(ty: ScalarType, bytes: [u8; 4]) -> Self {
        match ty {
            ScalarType::F32 => Self::F32(f32::from_le_bytes(bytes)),
            ScalarType::U32 => Self::U32(u32::from_le_bytes(bytes)),
            ScalarType::Pointer => Self::Pointer(u32::from_le_bytes(bytes)),
        }
    }

    pub fn as_f32(self) -> Option<f32> {
        match self {
            Self::F32(v) => Some(v),
            _ => None,
        }
    }
}

/// One named field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: ScalarType,
    pub offset: usize,
}

/// The byte layout of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: &'static str,
    pub fields: &'static [Field],
    pub size: usize,
}

impl RecordLayout {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True when every field starts where the previous one ends and the
    /// record size equals the sum of the field widths.
    pub const fn is_packed(&self) -> bool {
        let mut expected = 0;
        let mut i = 0;
        while i < self.fields.len() {
            if self.fields[i].offset != expected {
                return false;
            }
            expected += self.fields[i].ty.size();
            i += 1;
        }
        expected == self.size
    }
}

const fn f32_field(name: &'static str, offset: usize) -> Field {
    Field {
        name,
        ty: ScalarType::F32,
        offset,
    }
}

/// `vec3 = { x: f32 @0, y: f32 @4, z: f32 @8 }`, 12 bytes.
pub const VEC3_LAYOUT: RecordLayout = RecordLayout {
    name: "vec3",
    fields: &[f32_field("x", 0), f32_field("y", 4), f32_field("z", 8)],
    size: 12,
};

/// `quat = { x: f32 @0, y: f32 @4, z: f32 @8, w: f32 @12 }`, 16 bytes.
pub const QUAT_LAYOUT: RecordLayout = RecordLayout {
    name: "quat",
    fields: &[
        f32_field("x", 0),
        f32_field("y", 4),
        f32_field("z", 8),
        f32_field("w", 12),
    ],
    size: 16,
};

const _: () = assert!(VEC3_LAYOUT.is_packed());
const _: () = assert!(QUAT_LAYOUT.is_packed());
