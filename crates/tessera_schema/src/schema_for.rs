//! A schema paired with the naming policy it was produced under.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mapper::FieldMapper;
use crate::schema::Schema;

/// The schema an encoder reports, together with its field-naming policy.
///
/// The pairing is never separated: an encoder that reports a `SchemaFor`
/// must emit values of exactly that shape.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchemaFor {
    schema: Schema,
    field_mapper: FieldMapper,
}

impl SchemaFor {
    /// Pairs a schema with the default naming policy.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            field_mapper: FieldMapper::Default,
        }
    }

    /// Replaces the naming policy.
    #[must_use]
    pub fn with_field_mapper(mut self, field_mapper: FieldMapper) -> Self {
        self.field_mapper = field_mapper;
        self
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the naming policy.
    #[must_use]
    pub fn field_mapper(&self) -> FieldMapper {
        self.field_mapper
    }

    /// Transforms the schema, keeping the naming policy.
    #[must_use]
    pub fn map(self, f: impl FnOnce(Schema) -> Schema) -> Self {
        Self {
            schema: f(self.schema),
            field_mapper: self.field_mapper,
        }
    }

    /// Creates a child `SchemaFor` that inherits this policy.
    #[must_use]
    pub fn for_field(&self, schema: Schema) -> Self {
        Self {
            schema,
            field_mapper: self.field_mapper,
        }
    }

    /// Consumes the pairing and returns the schema.
    #[must_use]
    pub fn into_schema(self) -> Schema {
        self.schema
    }
}

impl From<Schema> for SchemaFor {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}

impl fmt::Display for SchemaFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.schema, f)
    }
}
