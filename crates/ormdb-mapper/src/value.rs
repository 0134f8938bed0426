//! Runtime values moved between records and the SQL layer.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::shape::Kind;

/// A column value extracted from, or assigned onto, a record.
///
/// Integer widths are kept distinct so that extracting a field and
/// assigning the value back reproduces the field exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 8-bit signed integer.
    Int8(i8),
    /// 16-bit signed integer.
    Int16(i16),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 8-bit unsigned integer.
    UInt8(u8),
    /// 16-bit unsigned integer.
    UInt16(u16),
    /// 32-bit unsigned integer.
    UInt32(u32),
    /// 64-bit unsigned integer.
    UInt64(u64),
    /// 32-bit floating point.
    Float32(f32),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int8(_) => "i8",
            Value::Int16(_) => "i16",
            Value::Int32(_) => "i32",
            Value::Int64(_) => "i64",
            Value::UInt8(_) => "u8",
            Value::UInt16(_) => "u16",
            Value::UInt32(_) => "u32",
            Value::UInt64(_) => "u64",
            Value::Float32(_) => "f32",
            Value::Float64(_) => "f64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Kind of the carried value. Null has no kind.
    pub fn kind(&self) -> Option<Kind> {
        let kind = match self {
            Value::Null => return None,
            Value::Bool(_) => Kind::Bool,
            Value::Int8(_) => Kind::Int8,
            Value::Int16(_) => Kind::Int16,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::UInt8(_) => Kind::Uint8,
            Value::UInt16(_) => Kind::Uint16,
            Value::UInt32(_) => Kind::Uint32,
            Value::UInt64(_) => Kind::Uint64,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
            Value::String(_) => Kind::String,
            Value::Bytes(_) => Kind::Bytes,
        };
        Some(kind)
    }

    /// Integer payload of any width.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int8(i) => Some(*i as i128),
            Value::Int16(i) => Some(*i as i128),
            Value::Int32(i) => Some(*i as i128),
            Value::Int64(i) => Some(*i as i128),
            Value::UInt8(u) => Some(*u as i128),
            Value::UInt16(u) => Some(*u as i128),
            Value::UInt32(u) => Some(*u as i128),
            Value::UInt64(u) => Some(*u as i128),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(f) => Some(*f),
            Value::Float32(f) => Some(*f as f64),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into a concrete field type.
    pub fn cast<T: FromValue>(self) -> Result<T, Error> {
        T::from_value(self)
    }
}

/// Conversion from a [`Value`] into a field type.
///
/// Integers convert across widths when the number fits; everything else
/// requires the matching variant.
pub trait FromValue: Sized {
    /// Convert the value, failing with [`Error::TypeMismatch`].
    fn from_value(value: Value) -> Result<Self, Error>;
}

macro_rules! integer_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, Error> {
                value
                    .as_integer()
                    .and_then(|i| <$ty>::try_from(i).ok())
                    .ok_or(Error::TypeMismatch {
                        expected: stringify!($ty),
                        found: value.type_name(),
                    })
            }
        }
    )*};
}

integer_value! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt64(v as u64)
    }
}

impl FromValue for isize {
    fn from_value(value: Value) -> Result<Self, Error> {
        value
            .as_integer()
            .and_then(|i| isize::try_from(i).ok())
            .ok_or(Error::TypeMismatch {
                expected: "isize",
                found: value.type_name(),
            })
    }
}

impl FromValue for usize {
    fn from_value(value: Value) -> Result<Self, Error> {
        value
            .as_integer()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or(Error::TypeMismatch {
                expected: "usize",
                found: value.type_name(),
            })
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::TypeMismatch {
                expected: "bool",
                found: other.type_name(),
            }),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Float32(f) => Ok(f),
            other => Err(Error::TypeMismatch {
                expected: "f32",
                found: other.type_name(),
            }),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, Error> {
        value.as_f64().ok_or(Error::TypeMismatch {
            expected: "f64",
            found: value.type_name(),
        })
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::TypeMismatch {
                expected: "string",
                found: other.type_name(),
            }),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Bytes(b) => Ok(b),
            other => Err(Error::TypeMismatch {
                expected: "bytes",
                found: other.type_name(),
            }),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
