//! Mapper error types.

use thiserror::Error;

/// Errors raised while resolving entity metadata or moving values in and out
/// of records.
#[derive(Debug, Error)]
pub enum Error {
    /// Resolution was requested for an absent type.
    #[error("entity type is empty")]
    EmptyType,

    /// The type declares no fields at all.
    #[error("entity type `{0}` declares no fields")]
    NoFields(String),

    /// The target is neither a record nor an allowed scalar.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No field is mapped to the column.
    ///
    /// Lenient lookups swallow this and treat it as "nothing to do".
    #[error("column `{column}` is not mapped on `{type_name}`")]
    UnmappedColumn {
        /// Qualified type name.
        type_name: String,
        /// Column that was looked up.
        column: String,
    },

    /// The record's accessors do not know a field its shape declares.
    #[error("type `{type_name}` has no accessible field `{field}`")]
    UnknownField {
        /// Qualified type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// An embedded member held by reference is absent.
    #[error("embedded field `{field}` of `{type_name}` is nil")]
    NilEmbedded {
        /// Qualified type name of the record holding the member.
        type_name: String,
        /// Name of the embedded member.
        field: String,
    },

    /// A value could not be converted into the field's type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Type the field expects.
        expected: &'static str,
        /// Type of the supplied value.
        found: &'static str,
    },

    /// Serialization round trip failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_cbor::Error),
}

/// Result alias for mapper operations.
pub type Result<T> = std::result::Result<T, Error>;
