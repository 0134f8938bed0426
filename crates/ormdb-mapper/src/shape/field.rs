//! Field declarations for record shapes.

use std::fmt;

use super::kind::Kind;
use super::Shape;

/// The declared type of a field.
///
/// Struct-valued and pointer-to-struct fields carry the target's shape so the
/// flattener can descend into embedded members without an instance. The
/// shape is only stored here, never read, so a shape may point at itself.
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    kind: Kind,
    elem: Option<&'static Shape>,
}

impl TypeRef {
    /// String type.
    pub const STRING: TypeRef = TypeRef::scalar(Kind::String);
    /// Boolean type.
    pub const BOOL: TypeRef = TypeRef::scalar(Kind::Bool);
    /// 32-bit integer type.
    pub const INT32: TypeRef = TypeRef::scalar(Kind::Int32);
    /// 64-bit integer type.
    pub const INT64: TypeRef = TypeRef::scalar(Kind::Int64);
    /// 64-bit unsigned integer type.
    pub const UINT64: TypeRef = TypeRef::scalar(Kind::Uint64);
    /// 32-bit float type.
    pub const FLOAT32: TypeRef = TypeRef::scalar(Kind::Float32);
    /// 64-bit float type.
    pub const FLOAT64: TypeRef = TypeRef::scalar(Kind::Float64);
    /// Binary type.
    pub const BYTES: TypeRef = TypeRef::scalar(Kind::Bytes);

    /// Create a type reference with an explicit name.
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            elem: None,
        }
    }

    /// Create a scalar type named after its kind.
    pub const fn scalar(kind: Kind) -> Self {
        Self::new(kind.name(), kind)
    }

    /// A struct held by value.
    pub const fn structure(shape: &'static Shape) -> Self {
        Self {
            name: "",
            kind: Kind::Struct,
            elem: Some(shape),
        }
    }

    /// A struct held by reference; may be absent at runtime.
    pub const fn pointer(shape: &'static Shape) -> Self {
        Self {
            name: "",
            kind: Kind::Ptr,
            elem: Some(shape),
        }
    }

    /// Display name. Struct and pointer types are named after their shape.
    pub fn name(&self) -> &'static str {
        match self.elem {
            Some(shape) => shape.name,
            None => self.name,
        }
    }

    /// Kind of the type.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Shape of the struct behind this type, following one pointer level.
    pub fn struct_shape(&self) -> Option<&'static Shape> {
        match self.kind {
            Kind::Struct | Kind::Ptr => self.elem,
            _ => None,
        }
    }
}

// Shapes are compared and printed by name so that a type holding a pointer
// to itself does not recurse.
impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.kind == other.kind
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("name", &self.name())
            .field("kind", &self.kind)
            .finish()
    }
}

/// A field declaration within a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name. A leading uppercase letter marks the field as exported.
    pub name: &'static str,
    /// Declared type.
    pub ty: TypeRef,
    /// Column annotation.
    pub column: Option<&'static str>,
    /// Whether the field is embedded, promoting its own fields.
    pub anonymous: bool,
}

impl FieldDecl {
    /// Declare a plain field without a column.
    pub const fn new(name: &'static str, ty: TypeRef) -> Self {
        Self {
            name,
            ty,
            column: None,
            anonymous: false,
        }
    }

    /// Declare a field mapped to a column.
    pub const fn column(name: &'static str, ty: TypeRef, column: &'static str) -> Self {
        Self {
            name,
            ty,
            column: Some(column),
            anonymous: false,
        }
    }

    /// Declare an embedded field.
    pub const fn embedded(name: &'static str, ty: TypeRef) -> Self {
        Self {
            name,
            ty,
            column: None,
            anonymous: true,
        }
    }

    /// Column annotation, ignoring empty ones.
    pub fn column_name(&self) -> Option<&'static str> {
        self.column.filter(|c| !c.is_empty())
    }

    /// Check if the field is visible outside its declaring type.
    pub fn is_exported(&self) -> bool {
        is_exported(self.name)
    }
}

/// Naming rule for visibility: exported names start with an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    static NODE: Shape = Shape {
        name: "tests::Node",
        fields: &[
            FieldDecl::column("ID", TypeRef::INT64, "id"),
            FieldDecl::embedded("Node", TypeRef::pointer(&NODE)),
        ],
    };

    #[test]
    fn test_field_decl_builders() {
        let field = FieldDecl::column("Name", TypeRef::STRING, "name");
        assert_eq!(field.column_name(), Some("name"));
        assert!(field.is_exported());
        assert!(!field.anonymous);

        let empty = FieldDecl::column("Name", TypeRef::STRING, "");
        assert_eq!(empty.column_name(), None);

        let private = FieldDecl::new("secret", TypeRef::STRING);
        assert!(!private.is_exported());
    }

    #[test]
    fn test_is_exported() {
        assert!(is_exported("ID"));
        assert!(is_exported("Émile"));
        assert!(!is_exported("id"));
        assert!(!is_exported("_ID"));
        assert!(!is_exported(""));
    }

    #[test]
    fn test_struct_shape_follows_one_pointer() {
        let by_ref = TypeRef::pointer(&NODE);
        assert_eq!(by_ref.struct_shape().map(|s| s.name), Some("tests::Node"));

        let by_value = TypeRef::structure(&NODE);
        assert_eq!(by_value.kind(), Kind::Struct);
        assert_eq!(by_value.name(), "tests::Node");
        assert!(by_value.struct_shape().is_some());

        assert!(TypeRef::STRING.struct_shape().is_none());
    }

    #[test]
    fn test_self_referential_type_ref_compares() {
        let a = NODE.fields[1].ty;
        let b = TypeRef::pointer(&NODE);
        assert_eq!(a, b);
        assert!(format!("{a:?}").contains("tests::Node"));
    }
}
