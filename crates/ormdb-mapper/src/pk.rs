//! Primary key resolution.

use serde::{Deserialize, Serialize};

use crate::descriptor::{Registry, TypeDescriptor};
use crate::entity::{PkSequence, StructEntity};
use crate::error::Error;
use crate::value::Value;

/// How a vendor produces primary key values at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyGeneration {
    /// Call the sequence expression explicitly.
    Sequence(String),
    /// A trigger or auto-increment column generates the key.
    Generated,
}

/// Interpret a sequence map for one vendor. `None` when the vendor has no
/// entry and the key is expected to be supplied by the caller.
pub fn key_generation(sequences: Option<&PkSequence>, vendor: &str) -> Option<KeyGeneration> {
    let expression = sequences?.get(vendor)?;
    if expression.is_empty() {
        Some(KeyGeneration::Generated)
    } else {
        Some(KeyGeneration::Sequence(expression.clone()))
    }
}

impl TypeDescriptor {
    /// Field backing the primary key column.
    ///
    /// Returns an empty string when the column is unmapped; keyless entities
    /// and keys generated outside the struct are legitimate.
    pub fn pk_field_name(&self, pk_column: &str) -> &'static str {
        self.column_map().get(pk_column).map_or("", |meta| meta.name)
    }
}

impl Registry {
    /// Field backing an entity's primary key, or an empty string.
    pub fn entity_pk_field_name<E: StructEntity>(&self, entity: &E) -> Result<&'static str, Error> {
        let descriptor = self.describe(entity)?;
        Ok(descriptor.pk_field_name(entity.pk_column_name()))
    }

    /// Current primary key value. `None` when no key field is resolved.
    pub fn pk_value<E: StructEntity>(&self, entity: &E) -> Result<Option<Value>, Error> {
        let descriptor = self.describe(entity)?;
        let field = descriptor.pk_field_name(entity.pk_column_name());
        if field.is_empty() {
            return Ok(None);
        }
        descriptor.field_value(entity, field).map(Some)
    }

    /// Write a generated key back onto the entity. No-op for keyless
    /// entities.
    pub fn assign_pk<E: StructEntity>(&self, entity: &mut E, value: Value) -> Result<(), Error> {
        let descriptor = self.describe(&*entity)?;
        let column = entity.pk_column_name().to_string();
        descriptor.set_by_column(entity, &column, value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::shape::{FieldDecl, Record, Shape, TypeRef};

    static TICKET: Shape = Shape {
        name: "tests::Ticket",
        fields: &[
            FieldDecl::column("Code", TypeRef::STRING, "ticket_code"),
            FieldDecl::column("Title", TypeRef::STRING, "title"),
        ],
    };

    #[derive(Debug, Default)]
    struct Ticket {
        code: String,
        title: String,
        keyless: bool,
    }

    impl Record for Ticket {
        fn shape(&self) -> &'static Shape {
            &TICKET
        }

        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "Code" => Some(self.code.clone().into()),
                "Title" => Some(self.title.clone().into()),
                _ => None,
            }
        }

        fn set_field(&mut self, name: &str, value: Value) -> Result<(), Error> {
            match name {
                "Code" => self.code = value.cast()?,
                "Title" => self.title = value.cast()?,
                _ => return Err(self.unknown_field(name)),
            }
            Ok(())
        }
    }

    impl StructEntity for Ticket {
        fn table_name(&self) -> &str {
            "t_ticket"
        }

        fn pk_column_name(&self) -> &str {
            if self.keyless {
                "rowid"
            } else {
                "ticket_code"
            }
        }
    }

    #[test]
    fn test_pk_field_name() {
        let registry = Registry::new();
        let ticket = Ticket::default();

        assert_eq!(registry.entity_pk_field_name(&ticket).unwrap(), "Code");

        let desc = registry.describe(&ticket).unwrap();
        assert_eq!(desc.pk_field_name("title"), "Title");
        assert_eq!(desc.pk_field_name("id"), "");
    }

    #[test]
    fn test_pk_value_and_assign() {
        let registry = Registry::new();
        let mut ticket = Ticket::default();

        registry.assign_pk(&mut ticket, "T-1".into()).unwrap();
        assert_eq!(ticket.code, "T-1");
        assert_eq!(
            registry.pk_value(&ticket).unwrap(),
            Some(Value::String("T-1".into()))
        );
    }

    #[test]
    fn test_keyless_entity() {
        let registry = Registry::new();
        let mut ticket = Ticket {
            keyless: true,
            ..Ticket::default()
        };

        assert_eq!(registry.entity_pk_field_name(&ticket).unwrap(), "");
        assert_eq!(registry.pk_value(&ticket).unwrap(), None);

        registry.assign_pk(&mut ticket, "T-2".into()).unwrap();
        assert!(ticket.code.is_empty());
    }

    #[test]
    fn test_key_generation() {
        let mut sequences = HashMap::new();
        sequences.insert("oracle".to_string(), "SEQ_TICKET.NEXTVAL".to_string());
        sequences.insert("mysql".to_string(), String::new());

        assert_eq!(
            key_generation(Some(&sequences), "oracle"),
            Some(KeyGeneration::Sequence("SEQ_TICKET.NEXTVAL".into()))
        );
        assert_eq!(
            key_generation(Some(&sequences), "mysql"),
            Some(KeyGeneration::Generated)
        );
        assert_eq!(key_generation(Some(&sequences), "postgresql"), None);
        assert_eq!(key_generation(None, "oracle"), None);
    }
}
