//! Resolved type descriptors and the metadata cache.
//!
//! A [`TypeDescriptor`] is the flattened, partitioned view of one shape:
//! which fields are exported, which are private, and which exported fields
//! back a column. Descriptors are built once per type by the [`Registry`]
//! and never change afterwards.

mod flatten;
mod registry;

use std::collections::HashMap;

pub use flatten::flatten;
pub use registry::{CacheStats, Registry};

use crate::config::ColumnOrder;
use crate::error::Error;
use crate::shape::{is_exported, FieldDecl, Shape, TypeRef};

/// Metadata for one claimed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Field name.
    pub name: &'static str,
    /// Declared type.
    pub ty: TypeRef,
    /// Column annotation, if any.
    pub column: Option<&'static str>,
    /// Whether the field is an embedded member.
    pub anonymous: bool,
    /// Embedded members walked from the outer type to the field's owner.
    /// Empty for fields declared directly on the outer type.
    pub path: Vec<&'static str>,
}

impl FieldMeta {
    pub(crate) fn from_decl(decl: &'static FieldDecl, path: Vec<&'static str>) -> Self {
        Self {
            name: decl.name,
            ty: decl.ty,
            column: decl.column_name(),
            anonymous: decl.anonymous,
            path,
        }
    }

    /// Embedding depth; 0 for the outer type's own fields.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Check if the field was promoted from an embedded member.
    pub fn is_promoted(&self) -> bool {
        !self.path.is_empty()
    }

    /// Check if the field is exported.
    pub fn is_exported(&self) -> bool {
        is_exported(self.name)
    }
}

/// Resolved field and column metadata for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    type_name: &'static str,
    exported_fields: HashMap<&'static str, FieldMeta>,
    private_fields: HashMap<&'static str, FieldMeta>,
    column_map: HashMap<&'static str, FieldMeta>,
    columns: Vec<&'static str>,
}

impl TypeDescriptor {
    /// Flatten and partition a shape.
    ///
    /// Only exported fields with a non-empty column annotation enter the
    /// column map. If two claimed fields carry the same column, the one
    /// claimed first keeps it.
    pub fn build(shape: &'static Shape, order: ColumnOrder) -> Self {
        let mut exported_fields = HashMap::new();
        let mut private_fields = HashMap::new();
        let mut column_map = HashMap::new();
        let mut columns = Vec::new();

        for meta in flatten(shape) {
            if !meta.is_exported() {
                private_fields.insert(meta.name, meta);
                continue;
            }
            if let Some(column) = meta.column {
                if !column_map.contains_key(column) {
                    column_map.insert(column, meta.clone());
                    columns.push(column);
                }
            }
            exported_fields.insert(meta.name, meta);
        }

        if order == ColumnOrder::Lexical {
            columns.sort_unstable();
        }

        Self {
            type_name: shape.name,
            exported_fields,
            private_fields,
            column_map,
            columns,
        }
    }

    /// Qualified name of the described type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Exported fields, promoted ones included.
    pub fn exported_fields(&self) -> &HashMap<&'static str, FieldMeta> {
        &self.exported_fields
    }

    /// Private fields, promoted ones included.
    pub fn private_fields(&self) -> &HashMap<&'static str, FieldMeta> {
        &self.private_fields
    }

    /// Column name to backing field.
    pub fn column_map(&self) -> &HashMap<&'static str, FieldMeta> {
        &self.column_map
    }

    /// Mapped column names in the registry's configured order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Look up a field by name, exported or private.
    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.exported_fields
            .get(name)
            .or_else(|| self.private_fields.get(name))
    }

    /// Look up the field backing a column.
    pub fn column_field(&self, column: &str) -> Result<&FieldMeta, Error> {
        self.column_map
            .get(column)
            .ok_or_else(|| Error::UnmappedColumn {
                type_name: self.type_name.to_string(),
                column: column.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static AUDIT: Shape = Shape {
        name: "tests::Audit",
        fields: &[
            FieldDecl::column("CreatedBy", TypeRef::STRING, "created_by"),
            FieldDecl::column("revision", TypeRef::INT64, "revision"),
        ],
    };

    static ACCOUNT: Shape = Shape {
        name: "tests::Account",
        fields: &[
            FieldDecl::column("ID", TypeRef::INT64, "id"),
            FieldDecl::column("Owner", TypeRef::STRING, "owner"),
            FieldDecl::new("Balance", TypeRef::FLOAT64),
            FieldDecl::column("secret", TypeRef::STRING, "secret"),
            FieldDecl::embedded("Audit", TypeRef::pointer(&AUDIT)),
        ],
    };

    #[test]
    fn test_partition_by_visibility() {
        let desc = TypeDescriptor::build(&ACCOUNT, ColumnOrder::Lexical);

        let mut exported: Vec<_> = desc.exported_fields().keys().copied().collect();
        exported.sort_unstable();
        assert_eq!(exported, vec!["Audit", "Balance", "CreatedBy", "ID", "Owner"]);

        let mut private: Vec<_> = desc.private_fields().keys().copied().collect();
        private.sort_unstable();
        assert_eq!(private, vec!["revision", "secret"]);
    }

    #[test]
    fn test_column_map_only_exported_annotated() {
        let desc = TypeDescriptor::build(&ACCOUNT, ColumnOrder::Lexical);

        assert_eq!(desc.columns(), ["created_by", "id", "owner"]);
        assert_eq!(desc.column_map().len(), 3);
        assert!(desc.column_map().get("secret").is_none());
        assert!(desc.column_map().get("revision").is_none());
        assert!(desc.exported_fields().contains_key("Balance"));

        for meta in desc.column_map().values() {
            assert_eq!(desc.exported_fields().get(meta.name), Some(meta));
        }
    }

    #[test]
    fn test_declaration_order() {
        let desc = TypeDescriptor::build(&ACCOUNT, ColumnOrder::Declaration);
        assert_eq!(desc.columns(), ["id", "owner", "created_by"]);
    }

    #[test]
    fn test_promoted_field_meta() {
        let desc = TypeDescriptor::build(&ACCOUNT, ColumnOrder::Lexical);
        let created_by = desc.column_field("created_by").unwrap();

        assert_eq!(created_by.name, "CreatedBy");
        assert_eq!(created_by.path, vec!["Audit"]);
        assert_eq!(created_by.depth(), 1);
        assert!(created_by.is_promoted());

        let audit = desc.field("Audit").unwrap();
        assert!(audit.anonymous);
        assert!(!audit.is_promoted());
    }

    #[test]
    fn test_unmapped_column() {
        let desc = TypeDescriptor::build(&ACCOUNT, ColumnOrder::Lexical);
        let err = desc.column_field("nonexistent").unwrap_err();
        assert!(matches!(err, Error::UnmappedColumn { ref column, .. } if column == "nonexistent"));
    }
}
