use std::fmt;

use crate::error::{ValueError, ValueResult};

/// Element type of a typed numeric view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl TypedArrayKind {
    pub const ALL: [TypedArrayKind; 8] = [
        TypedArrayKind::Int8,
        TypedArrayKind::Uint8,
        TypedArrayKind::Int16,
        TypedArrayKind::Uint16,
        TypedArrayKind::Int32,
        TypedArrayKind::Uint32,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
    ];

    /// Constructor name, e.g. `Uint16Array`.
    pub fn name(&self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
        }
    }

    pub fn bytes_per_element(&self) -> usize {
        match self {
            TypedArrayKind::Int8 | TypedArrayKind::Uint8 => 1,
            TypedArrayKind::Int16 | TypedArrayKind::Uint16 => 2,
            TypedArrayKind::Int32 | TypedArrayKind::Uint32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Float64 => 8,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for TypedArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed numeric view that owns its elements.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedArray {
    /// Zero-filled view of `len` elements.
    pub fn zeroed(kind: TypedArrayKind, len: usize) -> Self {
        match kind {
            TypedArrayKind::Int8 => TypedArray::Int8(vec![0; len]),
            TypedArrayKind::Uint8 => TypedArray::Uint8(vec![0; len]),
            TypedArrayKind::Int16 => TypedArray::Int16(vec![0; len]),
            TypedArrayKind::Uint16 => TypedArray::Uint16(vec![0; len]),
            TypedArrayKind::Int32 => TypedArray::Int32(vec![0; len]),
            TypedArrayKind::Uint32 => TypedArray::Uint32(vec![0; len]),
            TypedArrayKind::Float32 => TypedArray::Float32(vec![0.0; len]),
            TypedArrayKind::Float64 => TypedArray::Float64(vec![0.0; len]),
        }
    }

    pub fn kind(&self) -> TypedArrayKind {
        match self {
            TypedArray::Int8(_) => TypedArrayKind::Int8,
            TypedArray::Uint8(_) => TypedArrayKind::Uint8,
            TypedArray::Int16(_) => TypedArrayKind::Int16,
            TypedArray::Uint16(_) => TypedArrayKind::Uint16,
            TypedArray::Int32(_) => TypedArrayKind::Int32,
            TypedArray::Uint32(_) => TypedArrayKind::Uint32,
            TypedArray::Float32(_) => TypedArrayKind::Float32,
            TypedArray::Float64(_) => TypedArrayKind::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn byte_len(&self) -> usize {
        self.len() * self.kind().bytes_per_element()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            TypedArray::Int8(v) => v.get(index).map(|&x| f64::from(x)),
            TypedArray::Uint8(v) => v.get(index).map(|&x| f64::from(x)),
            TypedArray::Int16(v) => v.get(index).map(|&x| f64::from(x)),
            TypedArray::Uint16(v) => v.get(index).map(|&x| f64::from(x)),
            TypedArray::Int32(v) => v.get(index).map(|&x| f64::from(x)),
            TypedArray::Uint32(v) => v.get(index).map(|&x| f64::from(x)),
            TypedArray::Float32(v) => v.get(index).map(|&x| f64::from(x)),
            TypedArray::Float64(v) => v.get(index).copied(),
        }
    }

    /// Store `value` at `index`, converting like an element assignment:
    /// integer kinds truncate and wrap modulo their width, `NaN` stores 0.
    pub fn set(&mut self, index: usize, value: f64) -> ValueResult<()> {
        let len = self.len();
        if index >= len {
            return Err(ValueError::OutOfRange { index, len });
        }
        let wrapped = wrap_integer(value);
        match self {
            TypedArray::Int8(v) => v[index] = wrapped as i8,
            TypedArray::Uint8(v) => v[index] = wrapped as u8,
            TypedArray::Int16(v) => v[index] = wrapped as i16,
            TypedArray::Uint16(v) => v[index] = wrapped as u16,
            TypedArray::Int32(v) => v[index] = wrapped as i32,
            TypedArray::Uint32(v) => v[index] = wrapped as u32,
            TypedArray::Float32(v) => v[index] = value as f32,
            TypedArray::Float64(v) => v[index] = value,
        }
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }
}

// Truncated value reduced modulo 2^32; narrower casts then keep the low bits.
fn wrap_integer(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let truncated = value.trunc() % 4_294_967_296.0;
    let positive = if truncated < 0.0 {
        truncated + 4_294_967_296.0
    } else {
        truncated
    };
    positive as u32
}
