//! Moving column values in and out of records.
//!
//! The write path turns a record into parallel column/value lists; the read
//! path assigns one result column at a time. Both go through the cached
//! descriptor and reach promoted fields along the recorded embedding path.

use crate::descriptor::{FieldMeta, Registry, TypeDescriptor};
use crate::error::Error;
use crate::shape::{Kind, Record};
use crate::value::{FromValue, Value};

/// A target a query result can be read into.
///
/// Every [`Record`] is a target of kind [`Kind::Struct`]. Bare scalars are
/// targets for single-column queries; only strings, integers and floats are
/// accepted by [`check_target`].
pub trait Bindable {
    /// Kind of the target.
    fn kind(&self) -> Kind;

    /// The target as a record, if it is one.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// The target as a mutable record, if it is one.
    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// Assign a bare column value to a scalar target.
    fn bind_scalar(&mut self, value: Value) -> Result<(), Error> {
        Err(Error::InvalidArgument(format!(
            "cannot bind {} to a {} target",
            value.type_name(),
            self.kind()
        )))
    }
}

impl<T: Record> Bindable for T {
    fn kind(&self) -> Kind {
        Kind::Struct
    }

    fn as_record(&self) -> Option<&dyn Record> {
        Some(self)
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        Some(self)
    }
}

macro_rules! scalar_target {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Bindable for $ty {
            fn kind(&self) -> Kind {
                Kind::$kind
            }

            fn bind_scalar(&mut self, value: Value) -> Result<(), Error> {
                *self = <$ty>::from_value(value)?;
                Ok(())
            }
        }
    )*};
}

scalar_target! {
    String => String,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    usize => Uint,
    f32 => Float32,
    f64 => Float64,
}

impl Bindable for bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }
}

impl Bindable for Vec<u8> {
    fn kind(&self) -> Kind {
        Kind::Bytes
    }
}

/// Validate a read target.
///
/// Accepts records and the allowed scalar kinds; everything else is an
/// [`Error::InvalidArgument`].
pub fn check_target(target: &dyn Bindable) -> Result<Kind, Error> {
    let kind = target.kind();
    if kind == Kind::Struct || kind.is_allowed_scalar() {
        Ok(kind)
    } else {
        Err(Error::InvalidArgument(format!(
            "target must be a record or a string, integer or float, got {kind}"
        )))
    }
}

/// Walk the embedding path. `None` when a by-reference member is nil.
fn owner<'a>(record: &'a dyn Record, meta: &FieldMeta) -> Option<&'a dyn Record> {
    let mut current = record;
    for member in &meta.path {
        current = current.embedded(member)?;
    }
    Some(current)
}

fn owner_mut<'a>(
    record: &'a mut dyn Record,
    meta: &FieldMeta,
) -> Result<&'a mut dyn Record, Error> {
    let mut current = record;
    for member in &meta.path {
        let type_name = current.shape().name;
        current = match current.embedded_mut(member) {
            Some(next) => next,
            None => {
                return Err(Error::NilEmbedded {
                    type_name: type_name.to_string(),
                    field: member.to_string(),
                })
            }
        };
    }
    Ok(current)
}

/// Read a field through its descriptor entry. A nil member on the path
/// reads as null.
fn read(record: &dyn Record, meta: &FieldMeta) -> Result<Value, Error> {
    match owner(record, meta) {
        Some(owner) => owner
            .field(meta.name)
            .ok_or_else(|| owner.unknown_field(meta.name)),
        None => Ok(Value::Null),
    }
}

impl TypeDescriptor {
    /// Extract one column/value pair per mapped column, in column order.
    pub fn columns_and_values(
        &self,
        record: &dyn Record,
    ) -> Result<(Vec<String>, Vec<Value>), Error> {
        let mut columns = Vec::with_capacity(self.columns().len());
        let mut values = Vec::with_capacity(self.columns().len());

        for column in self.columns() {
            let meta = self.column_field(column)?;
            columns.push(column.to_string());
            values.push(read(record, meta)?);
        }

        Ok((columns, values))
    }

    /// Assign a column value onto a record.
    ///
    /// An unmapped column is not an error: result sets routinely carry
    /// columns the entity does not map.
    pub fn set_by_column(
        &self,
        record: &mut dyn Record,
        column: &str,
        value: Value,
    ) -> Result<(), Error> {
        let meta = match self.column_field(column) {
            Ok(meta) => meta,
            Err(Error::UnmappedColumn { .. }) => return Ok(()),
            Err(err) => return Err(err),
        };
        owner_mut(record, meta)?.set_field(meta.name, value)
    }

    /// Read any resolved field by field name.
    pub fn field_value(&self, record: &dyn Record, field_name: &str) -> Result<Value, Error> {
        let meta = self.field(field_name).ok_or_else(|| Error::UnknownField {
            type_name: self.type_name().to_string(),
            field: field_name.to_string(),
        })?;
        read(record, meta)
    }
}

impl Registry {
    /// Extract the mapped columns and their values from a record.
    pub fn columns_and_values(
        &self,
        record: &dyn Record,
    ) -> Result<(Vec<String>, Vec<Value>), Error> {
        self.describe(record)?.columns_and_values(record)
    }

    /// Assign a result column onto a target.
    ///
    /// Records are matched through the column map, ignoring unmapped
    /// columns. A scalar target takes the value whatever the column is named,
    /// so feeding it every column of a row leaves the last one bound. Use
    /// [`Registry::set_row`] to bind whole rows.
    pub fn set_by_column(
        &self,
        target: &mut dyn Bindable,
        column: &str,
        value: Value,
    ) -> Result<(), Error> {
        check_target(&*target)?;
        match target.as_record_mut() {
            Some(record) => {
                let descriptor = self.describe(&*record)?;
                descriptor.set_by_column(record, column, value)
            }
            None => target.bind_scalar(value),
        }
    }

    /// Assign a whole result row onto a target.
    ///
    /// A record takes every mapped column. A scalar target takes the first
    /// column only; the rest of the row is ignored.
    pub fn set_row<C, I>(&self, target: &mut dyn Bindable, row: I) -> Result<(), Error>
    where
        C: AsRef<str>,
        I: IntoIterator<Item = (C, Value)>,
    {
        check_target(&*target)?;
        let mut row = row.into_iter();
        match target.as_record_mut() {
            Some(record) => {
                let descriptor = self.describe(&*record)?;
                for (column, value) in row {
                    descriptor.set_by_column(&mut *record, column.as_ref(), value)?;
                }
                Ok(())
            }
            None => match row.next() {
                Some((_, value)) => target.bind_scalar(value),
                None => Ok(()),
            },
        }
    }

    /// Read a record's field by field name.
    pub fn field_value(&self, record: &dyn Record, field_name: &str) -> Result<Value, Error> {
        self.describe(record)?.field_value(record, field_name)
    }
}
