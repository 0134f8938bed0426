//! ORMDB Mapper - Entity metadata resolution and column mapping.
//!
//! This crate resolves the field and column layout of entity types and moves
//! values between entities and result columns.
//!
//! # Modules
//!
//! - [`shape`] - Registration contract: static shapes and record accessors
//! - [`descriptor`] - Flattening, resolved descriptors and the metadata cache
//! - [`extract`] - Column/value extraction and per-column assignment
//! - [`pk`] - Primary key lookup and assignment
//! - [`copy`] - Deep copies through a serialization round trip
//! - [`entity`] - Struct and map entity contracts
//! - [`hooks`] - Overridable error and SQL reporting
//!
//! # Example
//!
//! ```
//! use ormdb_mapper::{FieldDecl, Record, Registry, Shape, TypeRef, Value};
//!
//! static POINT: Shape = Shape {
//!     name: "app::Point",
//!     fields: &[
//!         FieldDecl::column("X", TypeRef::INT64, "x"),
//!         FieldDecl::column("Y", TypeRef::INT64, "y"),
//!     ],
//! };
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl Record for Point {
//!     fn shape(&self) -> &'static Shape {
//!         &POINT
//!     }
//!
//!     fn field(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "X" => Some(self.x.into()),
//!             "Y" => Some(self.y.into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set_field(&mut self, name: &str, value: Value) -> ormdb_mapper::Result<()> {
//!         match name {
//!             "X" => self.x = value.cast()?,
//!             "Y" => self.y = value.cast()?,
//!             _ => return Err(self.unknown_field(name)),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let registry = Registry::global();
//! let (columns, values) = registry.columns_and_values(&Point { x: 1, y: 2 })?;
//! assert_eq!(columns, vec!["x", "y"]);
//! assert_eq!(values, vec![Value::Int64(1), Value::Int64(2)]);
//!
//! let mut point = Point::default();
//! registry.set_by_column(&mut point, "y", Value::Int64(5))?;
//! assert_eq!(point.y, 5);
//! # Ok::<(), ormdb_mapper::Error>(())
//! ```

pub mod config;
pub mod copy;
pub mod descriptor;
pub mod entity;
pub mod error;
pub mod extract;
pub mod hooks;
pub mod pk;
pub mod shape;
pub mod value;

pub use config::{ColumnOrder, RegistryConfig};
pub use copy::{deep_clone, deep_copy};
pub use descriptor::{flatten, CacheStats, FieldMeta, Registry, TypeDescriptor};
pub use entity::{EntityMap, MapEntity, PkSequence, StructEntity, DEFAULT_PK_COLUMN};
pub use error::{Error, Result};
pub use extract::{check_target, Bindable};
pub use pk::{key_generation, KeyGeneration};
pub use shape::{is_exported, FieldDecl, Kind, Record, Shape, TypeRef};
pub use value::{FromValue, Value};
