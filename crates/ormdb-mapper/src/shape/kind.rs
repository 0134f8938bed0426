//! Type kinds for declared fields.

use std::fmt;

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Boolean.
    Bool,
    /// Pointer-sized signed integer.
    Int,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Pointer-sized unsigned integer.
    Uint,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
    /// Binary data.
    Bytes,
    /// A record type with its own shape.
    Struct,
    /// A reference to another type (`Box`, `Option<Box<_>>`, ...).
    Ptr,
    /// A sequence.
    Slice,
    /// An associative container.
    Map,
    /// Anything else.
    Other,
}

impl Kind {
    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Struct => "struct",
            Kind::Ptr => "ptr",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Other => "other",
        }
    }

    /// Check if this kind is in the signed integer family.
    pub fn is_signed_integer(self) -> bool {
        matches!(
            self,
            Kind::Int | Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64
        )
    }

    /// Check if this kind is in the unsigned integer family.
    pub fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            Kind::Uint | Kind::Uint8 | Kind::Uint16 | Kind::Uint32 | Kind::Uint64
        )
    }

    /// Check if this kind is a floating point type.
    pub fn is_float(self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }

    /// Scalars a single-column query may be read into.
    ///
    /// Strings, integers and floats only; bool and bytes are not included.
    pub fn is_allowed_scalar(self) -> bool {
        self == Kind::String
            || self.is_signed_integer()
            || self.is_unsigned_integer()
            || self.is_float()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
