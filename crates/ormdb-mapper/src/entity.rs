//! Entity contracts consumed by the SQL layer.
//!
//! Struct-backed entities describe themselves through [`StructEntity`] on
//! top of their [`Record`] registration. Callers that cannot supply a fixed
//! shape use a field bag through [`MapEntity`], with [`EntityMap`] as the
//! stock implementation.

use std::collections::HashMap;

use crate::shape::Record;
use crate::value::Value;

/// Primary key column assumed when an entity does not name one.
pub const DEFAULT_PK_COLUMN: &str = "id";

/// Per-vendor primary key sequence expressions, keyed by database vendor.
///
/// A non-empty expression (for example `SEQ_USER.NEXTVAL`) is called
/// explicitly at insert time. An empty expression means the key is produced
/// by a trigger or an auto-increment column.
pub type PkSequence = HashMap<String, String>;

/// A struct-backed entity.
pub trait StructEntity: Record {
    /// Table the entity maps to.
    fn table_name(&self) -> &str;

    /// Primary key column name. A column name rather than a field name, so
    /// that struct and map entities share the same contract.
    fn pk_column_name(&self) -> &str {
        DEFAULT_PK_COLUMN
    }

    /// Primary key sequences per vendor.
    fn pk_sequence(&self) -> Option<&PkSequence> {
        None
    }
}

/// An entity stored as a column-name/value bag.
pub trait MapEntity {
    /// Table the entity maps to.
    fn table_name(&self) -> &str;

    /// Primary key column name.
    fn pk_column_name(&self) -> &str;

    /// Primary key sequences per vendor.
    fn pk_sequence(&self) -> Option<&PkSequence>;

    /// Column values held by the bag.
    fn db_field_map(&self) -> &HashMap<String, Value>;

    /// Set a column value, returning the updated bag.
    fn set(&mut self, column: &str, value: Value) -> &HashMap<String, Value>;
}

/// Field-bag entity.
///
/// Leave the primary key unset when it is generated by a sequence or an
/// auto-increment column.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMap {
    table_name: String,
    /// Primary key column name.
    pub pk_column_name: String,
    /// Primary key sequences per vendor.
    pub pk_sequence: Option<PkSequence>,
    db_field_map: HashMap<String, Value>,
}

impl EntityMap {
    /// Create an empty bag for a table, keyed on [`DEFAULT_PK_COLUMN`].
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            pk_column_name: DEFAULT_PK_COLUMN.to_string(),
            pk_sequence: None,
            db_field_map: HashMap::new(),
        }
    }

    /// Set the primary key column.
    pub fn with_pk_column(mut self, column: impl Into<String>) -> Self {
        self.pk_column_name = column.into();
        self
    }

    /// Add a sequence expression for a vendor.
    pub fn with_pk_sequence(
        mut self,
        vendor: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.pk_sequence
            .get_or_insert_with(HashMap::new)
            .insert(vendor.into(), expression.into());
        self
    }

    /// Get a column value.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.db_field_map.get(column)
    }
}

impl MapEntity for EntityMap {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn pk_column_name(&self) -> &str {
        &self.pk_column_name
    }

    fn pk_sequence(&self) -> Option<&PkSequence> {
        self.pk_sequence.as_ref()
    }

    fn db_field_map(&self) -> &HashMap<String, Value> {
        &self.db_field_map
    }

    fn set(&mut self, column: &str, value: Value) -> &HashMap<String, Value> {
        self.db_field_map.insert(column.to_string(), value);
        &self.db_field_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_map_defaults() {
        let entity = EntityMap::new("t_user");

        assert_eq!(entity.table_name(), "t_user");
        assert_eq!(entity.pk_column_name(), DEFAULT_PK_COLUMN);
        assert!(entity.pk_sequence().is_none());
        assert!(entity.db_field_map().is_empty());
    }

    #[test]
    fn test_entity_map_set() {
        let mut entity = EntityMap::new("t_user").with_pk_column("user_id");

        entity.set("name", "a".into());
        let fields = entity.set("age", Value::Int32(30));

        assert_eq!(fields.len(), 2);
        assert_eq!(entity.get("name"), Some(&Value::String("a".into())));
        assert_eq!(entity.pk_column_name(), "user_id");

        entity.set("age", Value::Int32(31));
        assert_eq!(entity.get("age"), Some(&Value::Int32(31)));
        assert_eq!(entity.db_field_map().len(), 2);
    }

    #[test]
    fn test_entity_map_sequences() {
        let entity = EntityMap::new("t_user")
            .with_pk_sequence("oracle", "SEQ_USER.NEXTVAL")
            .with_pk_sequence("mysql", "");

        let sequences = entity.pk_sequence().unwrap();
        assert_eq!(sequences.get("oracle").map(String::as_str), Some("SEQ_USER.NEXTVAL"));
        assert_eq!(sequences.get("mysql").map(String::as_str), Some(""));
    }
}
