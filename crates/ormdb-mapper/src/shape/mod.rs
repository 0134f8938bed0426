//! Registration contract for entity types.
//!
//! Every entity type declares its structure once, as a `static` [`Shape`],
//! and exposes its field values through [`Record`]. The resolver works from
//! the shape alone; the extractor uses the record accessors.
//!
//! ```
//! use ormdb_mapper::{FieldDecl, Record, Shape, TypeRef, Value};
//!
//! #[derive(Default)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! static USER: Shape = Shape {
//!     name: "app::User",
//!     fields: &[
//!         FieldDecl::column("ID", TypeRef::INT64, "id"),
//!         FieldDecl::column("Name", TypeRef::STRING, "name"),
//!     ],
//! };
//!
//! impl Record for User {
//!     fn shape(&self) -> &'static Shape {
//!         &USER
//!     }
//!
//!     fn field(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "ID" => Some(self.id.into()),
//!             "Name" => Some(self.name.clone().into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set_field(&mut self, name: &str, value: Value) -> ormdb_mapper::Result<()> {
//!         match name {
//!             "ID" => self.id = value.cast()?,
//!             "Name" => self.name = value.cast()?,
//!             _ => return Err(self.unknown_field(name)),
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod field;
mod kind;

pub use field::{is_exported, FieldDecl, TypeRef};
pub use kind::Kind;

use crate::error::Error;
use crate::value::Value;

/// Declared structure of an entity type.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    /// Qualified type identity, unique per type. Used as the cache key.
    pub name: &'static str,
    /// Direct fields in declaration order, embedded members included.
    pub fields: &'static [FieldDecl],
}

impl Shape {
    /// Get a direct field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Direct embedded members in declaration order.
    pub fn embedded(&self) -> impl Iterator<Item = &'static FieldDecl> {
        self.fields.iter().filter(|f| f.anonymous)
    }
}

/// Value access for a registered entity type.
///
/// `field` and `set_field` cover the type's own fields only. Promoted fields
/// are reached through `embedded`/`embedded_mut`, which the extractor walks
/// using the path recorded at resolution time.
pub trait Record {
    /// The type's declared shape.
    fn shape(&self) -> &'static Shape;

    /// Read a direct field.
    fn field(&self, name: &str) -> Option<Value>;

    /// Assign a direct field.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), Error>;

    /// Reach a direct embedded member. `None` when a by-reference member is
    /// absent.
    fn embedded(&self, _name: &str) -> Option<&dyn Record> {
        None
    }

    /// Mutable counterpart of [`Record::embedded`].
    fn embedded_mut(&mut self, _name: &str) -> Option<&mut dyn Record> {
        None
    }

    /// Error for a field name the accessors do not handle.
    fn unknown_field(&self, name: &str) -> Error {
        Error::UnknownField {
            type_name: self.shape().name.to_string(),
            field: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ADDRESS: Shape = Shape {
        name: "tests::Address",
        fields: &[FieldDecl::column("City", TypeRef::STRING, "city")],
    };

    static PERSON: Shape = Shape {
        name: "tests::Person",
        fields: &[
            FieldDecl::column("ID", TypeRef::INT64, "id"),
            FieldDecl::embedded("Address", TypeRef::structure(&ADDRESS)),
            FieldDecl::new("note", TypeRef::STRING),
        ],
    };

    #[test]
    fn test_shape_lookup() {
        assert!(PERSON.field("ID").is_some());
        assert!(PERSON.field("note").is_some());
        assert!(PERSON.field("City").is_none());

        let embedded: Vec<_> = PERSON.embedded().map(|f| f.name).collect();
        assert_eq!(embedded, vec!["Address"]);
    }
}
