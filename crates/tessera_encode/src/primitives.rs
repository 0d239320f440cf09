//! Leaf encoders for scalar host types.
//!
//! A leaf reports a primitive schema and adapts its output when given
//! another schema it can represent, e.g. bytes written as a fixed type.

use std::sync::Arc;

use tessera_schema::{Error, FixedSchema, Result, Schema, SchemaFor, Value};

use crate::encoder::{EncodeValue, Encoder};

/// Types with a default encoder.
pub trait Encodable: Sized + 'static {
    /// Returns the default encoder for this type.
    fn encoder() -> Encoder<Self>;
}

/// Leaf encoder described by two plain functions.
struct Leaf<T> {
    schema_for: SchemaFor,
    /// Writes a value under the given schema. Only called with accepted schemas.
    write: fn(&T, &Schema) -> Result<Value>,
    accepts: fn(&Schema) -> bool,
    /// Name of the host type, for error messages.
    host: &'static str,
}

impl<T: 'static> Leaf<T> {
    fn encoder(
        schema: Schema,
        write: fn(&T, &Schema) -> Result<Value>,
        accepts: fn(&Schema) -> bool,
        host: &'static str,
    ) -> Encoder<T> {
        Encoder::concrete(Self {
            schema_for: SchemaFor::new(schema),
            write,
            accepts,
            host,
        })
    }
}

impl<T: 'static> EncodeValue<T> for Leaf<T> {
    fn encode(&self, value: &T) -> Result<Value> {
        (self.write)(value, self.schema_for.schema())
    }

    fn schema_for(&self) -> &SchemaFor {
        &self.schema_for
    }

    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<T>> {
        // A reference to the named type already in use keeps its definition.
        let names_current = matches!(
            schema_for.schema(),
            Schema::Ref(name) if self.schema_for.schema().refers_to(name)
        );
        let schema_for = if names_current {
            self.schema_for.clone()
        } else {
            schema_for
        };
        if !(self.accepts)(schema_for.schema()) {
            return Err(Error::schema_override(
                self.schema_for.to_string(),
                schema_for.to_string(),
                format!("{} values cannot be written as {}", self.host, schema_for.schema().kind()),
            ));
        }
        Ok(Encoder::concrete(Self {
            schema_for,
            write: self.write,
            accepts: self.accepts,
            host: self.host,
        }))
    }
}

/// Copies `bytes` into a zero-padded buffer of the fixed size.
fn to_fixed(bytes: &[u8], fixed: &Arc<FixedSchema>) -> Result<Value> {
    if bytes.len() > fixed.size {
        return Err(Error::value_mismatch(
            format!("fixed {}({})", fixed.name, fixed.size),
            format!("{} bytes do not fit", bytes.len()),
        ));
    }
    let mut buf = bytes.to_vec();
    buf.resize(fixed.size, 0);
    Ok(Value::Fixed(buf))
}

/// Encoder for `Vec<u8>` as variable-length bytes.
///
/// Under a fixed schema the bytes are zero-padded to the fixed size.
#[must_use]
pub fn bytes() -> Encoder<Vec<u8>> {
    Leaf::encoder(
        Schema::Bytes,
        |value: &Vec<u8>, schema| match schema {
            Schema::Fixed(fixed) => to_fixed(value, fixed),
            _ => Ok(Value::Bytes(value.clone())),
        },
        |schema| matches!(schema, Schema::Bytes | Schema::Fixed(_)),
        "bytes",
    )
}

impl Encodable for () {
    fn encoder() -> Encoder<Self> {
        Leaf::encoder(
            Schema::Null,
            |(), _| Ok(Value::Null),
            |schema| matches!(schema, Schema::Null),
            "()",
        )
    }
}

impl Encodable for bool {
    fn encoder() -> Encoder<Self> {
        Leaf::encoder(
            Schema::Boolean,
            |value, _| Ok(Value::Boolean(*value)),
            |schema| matches!(schema, Schema::Boolean),
            "bool",
        )
    }
}

impl Encodable for i32 {
    fn encoder() -> Encoder<Self> {
        Leaf::encoder(
            Schema::Int,
            |value, schema| match schema {
                Schema::Long => Ok(Value::Long(i64::from(*value))),
                _ => Ok(Value::Int(*value)),
            },
            |schema| matches!(schema, Schema::Int | Schema::Long),
            "i32",
        )
    }
}

impl Encodable for i64 {
    fn encoder() -> Encoder<Self> {
        Leaf::encoder(
            Schema::Long,
            |value, _| Ok(Value::Long(*value)),
            |schema| matches!(schema, Schema::Long),
            "i64",
        )
    }
}

impl Encodable for f32 {
    fn encoder() -> Encoder<Self> {
        Leaf::encoder(
            Schema::Float,
            |value, schema| match schema {
                Schema::Double => Ok(Value::Double(f64::from(*value))),
                _ => Ok(Value::Float(*value)),
            },
            |schema| matches!(schema, Schema::Float | Schema::Double),
            "f32",
        )
    }
}

impl Encodable for f64 {
    fn encoder() -> Encoder<Self> {
        Leaf::encoder(
            Schema::Double,
            |value, _| Ok(Value::Double(*value)),
            |schema| matches!(schema, Schema::Double),
            "f64",
        )
    }
}

impl Encodable for String {
    fn encoder() -> Encoder<Self> {
        Leaf::encoder(
            Schema::String,
            |value: &String, schema| match schema {
                Schema::Bytes => Ok(Value::Bytes(value.as_bytes().to_vec())),
                Schema::Fixed(fixed) => to_fixed(value.as_bytes(), fixed),
                _ => Ok(Value::from(value.as_str())),
            },
            |schema| matches!(schema, Schema::String | Schema::Bytes | Schema::Fixed(_)),
            "String",
        )
    }
}
