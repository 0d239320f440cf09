//! Named-record assembly.
//!
//! A record is built from a schema skeleton and an ordered list of fields,
//! each pairing an extractor with the encoder for the extracted value. The
//! result is resolvable: resolution registers the record's definition before
//! resolving the fields, so a field may refer back to the record (through
//! [`Encoder::lazy`]) and find the definition under construction.
//!
//! Resolution always hands each field encoder its declared field schema.
//! That keeps the values a record emits paired with the schema it reports,
//! including after a schema replacement renames or retypes fields.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tessera_schema::{
    Error, ErrorKind, Field, FieldMapper, Name, Record, RecordSchema, RecordSchemaBuilder,
    Result, Schema, SchemaFor, Value,
};

use crate::encoder::{EncodeValue, Encoder, ResolveEncoder};
use crate::env::{DefinitionEnvironment, TypeKey};
use crate::update::SchemaUpdate;

type Extractor<T, F> = Arc<dyn for<'a> Fn(&'a T) -> &'a F + Send + Sync>;

/// One record field: its schema, how to reach it, and how to encode it.
pub struct EncoderField<T: 'static, F: 'static> {
    field: Field,
    extract: Extractor<T, F>,
    encoder: Encoder<F>,
}

impl<T: 'static, F: 'static> EncoderField<T, F> {
    /// Creates a field.
    pub fn new(
        field: Field,
        extract: impl for<'a> Fn(&'a T) -> &'a F + Send + Sync + 'static,
        encoder: Encoder<F>,
    ) -> Self {
        Self {
            field,
            extract: Arc::new(extract),
            encoder,
        }
    }

    /// Returns the field's schema definition.
    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }
}

/// Host-type-erased view of an [`EncoderField`].
trait FieldEncoder<T>: Send + Sync {
    fn field(&self) -> &Field;

    /// Resolves the field's encoder against its declared schema.
    fn resolve(
        &self,
        env: &DefinitionEnvironment,
        schema_for: SchemaFor,
    ) -> Result<Box<dyn FieldEncoder<T>>>;

    fn encode(&self, value: &T) -> Result<Value>;
}

impl<T: 'static, F: 'static> FieldEncoder<T> for EncoderField<T, F> {
    fn field(&self) -> &Field {
        &self.field
    }

    fn resolve(
        &self,
        env: &DefinitionEnvironment,
        schema_for: SchemaFor,
    ) -> Result<Box<dyn FieldEncoder<T>>> {
        let encoder = self
            .encoder
            .resolve_in(env, &SchemaUpdate::FullSchema(schema_for))?;
        Ok(Box::new(Self {
            field: self.field.clone(),
            extract: Arc::clone(&self.extract),
            encoder,
        }))
    }

    fn encode(&self, value: &T) -> Result<Value> {
        self.encoder.encode((self.extract)(value))
    }
}

// =============================================================================
// Definition
// =============================================================================

/// The unresolved record: skeleton schema plus field encoders.
struct RecordDefinition<T: 'static> {
    key: TypeKey,
    schema_for: SchemaFor,
    fields: Vec<Box<dyn FieldEncoder<T>>>,
}

impl<T: 'static> RecordDefinition<T> {
    fn record_name(&self) -> String {
        self.schema_for
            .schema()
            .full_name()
            .unwrap_or_else(|| self.key.to_string())
    }

    /// Chooses the schema the resolved record reports under `update`.
    fn target_schema(&self, update: &SchemaUpdate) -> Result<SchemaFor> {
        let Some(replacement) = update.schema_for() else {
            return Ok(self.schema_for.clone());
        };
        match replacement.schema() {
            Schema::Record(record) if record.fields.len() == self.fields.len() => {
                tracing::debug!(
                    record = %self.record_name(),
                    replacement = %record.name,
                    "applying record schema override"
                );
                Ok(self.follow_rename(replacement))
            }
            Schema::Record(record) => Err(Error::schema_override(
                self.schema_for.to_string(),
                replacement.to_string(),
                format!(
                    "record has {} fields, replacement has {}",
                    self.fields.len(),
                    record.fields.len()
                ),
            )),
            Schema::Ref(name) if self.schema_for.schema().refers_to(name) => {
                Ok(self.schema_for.clone())
            }
            _ => Err(Error::schema_override(
                self.schema_for.to_string(),
                replacement.to_string(),
                "records can only be replaced by records",
            )),
        }
    }

    /// Points self-references in a renamed replacement at the new name.
    fn follow_rename(&self, replacement: &SchemaFor) -> SchemaFor {
        match self.schema_for.schema().name() {
            Some(skeleton) => retarget_refs(replacement, skeleton),
            None => replacement.clone(),
        }
    }

    fn build(
        self: &Arc<Self>,
        env: &DefinitionEnvironment,
        schema_for: &SchemaFor,
    ) -> Result<Encoder<T>> {
        let Some(record) = schema_for.schema().as_record() else {
            return Err(Error::new(ErrorKind::Internal(format!(
                "record {} resolved against {}",
                self.key,
                schema_for.schema()
            ))));
        };

        // Fixed and enum types declared by earlier fields may be referenced by name.
        let mut named = HashMap::new();
        let fields = self
            .fields
            .iter()
            .zip(&record.fields)
            .map(|(encoder, field)| {
                let schema = field.schema.expand_refs(&named);
                field.schema.collect_named(&mut named);
                encoder
                    .resolve(env, schema_for.for_field(schema))
                    .map_err(|err| err.with_frame(format!("{}.{}", record.name, field.name)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Encoder::concrete(RecordEncoder {
            definition: Arc::clone(self),
            schema_for: schema_for.clone(),
            record: Arc::clone(record),
            fields,
        }))
    }
}

impl<T: 'static> ResolveEncoder<T> for RecordDefinition<T> {
    fn encoder(
        self: Arc<Self>,
        env: &DefinitionEnvironment,
        update: &SchemaUpdate,
    ) -> Result<Encoder<T>> {
        env.define(
            &self.key,
            || self.target_schema(update),
            |extended, schema_for| self.build(extended, schema_for),
        )
    }
}

// =============================================================================
// Resolved encoder
// =============================================================================

/// A resolved record encoder.
///
/// Obtained by resolving the encoder built by [`RecordEncoder::builder`].
pub struct RecordEncoder<T: 'static> {
    definition: Arc<RecordDefinition<T>>,
    schema_for: SchemaFor,
    record: Arc<RecordSchema>,
    fields: Vec<Box<dyn FieldEncoder<T>>>,
}

impl<T: 'static> RecordEncoder<T> {
    /// Starts assembling a record named `name` in `namespace`.
    #[must_use]
    pub fn builder(name: impl Into<String>, namespace: impl Into<String>) -> RecordBuilder<T> {
        RecordBuilder {
            schema: RecordSchema::builder(name, namespace),
            key: None,
            field_mapper: FieldMapper::Default,
            fields: Vec::new(),
        }
    }

    /// Attributes a field failure to this record.
    fn attribute(&self, err: Error, field: &str) -> Error {
        match err.kind {
            ErrorKind::ValueMismatch { expected, reason } => Error::extraction_type(
                self.record.name.full_name(),
                field,
                format!("expected {expected}, {reason}"),
            ),
            _ => err.with_frame(format!("{}.{field}", self.record.name)),
        }
    }
}

impl<T: 'static> EncodeValue<T> for RecordEncoder<T> {
    fn encode(&self, value: &T) -> Result<Value> {
        let values = self
            .fields
            .iter()
            .zip(&self.record.fields)
            .map(|(encoder, field)| {
                encoder
                    .encode(value)
                    .map_err(|err| self.attribute(err, &field.name))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Record(Record::new(Arc::clone(&self.record), values)?))
    }

    fn schema_for(&self) -> &SchemaFor {
        &self.schema_for
    }

    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<T>> {
        // Recursive occurrences must see the replacement too, so start over.
        let schema_for = retarget_refs(&schema_for, &self.record.name);
        Arc::clone(&self.definition).encoder(
            &DefinitionEnvironment::new(),
            &SchemaUpdate::FullSchema(schema_for),
        )
    }
}

/// Rewrites references to `from` in a replacement record's fields to the
/// replacement's own name. Other schemas are returned unchanged.
fn retarget_refs(replacement: &SchemaFor, from: &Name) -> SchemaFor {
    match replacement.schema() {
        Schema::Record(record) if record.name != *from => {
            replacement.for_field(Schema::from(record.rename_refs(from, &record.name)))
        }
        _ => replacement.clone(),
    }
}

impl<T: 'static> fmt::Debug for RecordEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordEncoder")
            .field("key", &self.definition.key)
            .field("schema", self.schema_for.schema())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder returned by [`RecordEncoder::builder`].
pub struct RecordBuilder<T: 'static> {
    schema: RecordSchemaBuilder,
    key: Option<TypeKey>,
    field_mapper: FieldMapper,
    fields: Vec<Box<dyn FieldEncoder<T>>>,
}

impl<T: 'static> RecordBuilder<T> {
    /// Sets the record documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.schema = self.schema.doc(doc);
        self
    }

    /// Adds a record alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.schema = self.schema.alias(alias);
        self
    }

    /// Adds a custom property.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.schema = self.schema.prop(key, value);
        self
    }

    /// Sets the policy that turns names given to [`RecordBuilder::field`] into schema names.
    ///
    /// Applies to fields added after this call.
    #[must_use]
    pub fn field_mapper(mut self, field_mapper: FieldMapper) -> Self {
        self.field_mapper = field_mapper;
        self
    }

    /// Overrides the definition key. Defaults to the record's full name.
    #[must_use]
    pub fn key(mut self, key: TypeKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Appends a field. The name is passed through the field mapper.
    #[must_use]
    pub fn field<F: 'static>(
        self,
        name: &str,
        schema: impl Into<Schema>,
        extract: impl for<'a> Fn(&'a T) -> &'a F + Send + Sync + 'static,
        encoder: Encoder<F>,
    ) -> Self {
        let name = self.field_mapper.to_schema_name(name).into_owned();
        self.encoder_field(EncoderField::new(
            Field::new(name, schema.into()),
            extract,
            encoder,
        ))
    }

    /// Appends a field whose schema definition is given in full.
    ///
    /// The field name is used as given.
    #[must_use]
    pub fn field_with<F: 'static>(
        self,
        field: Field,
        extract: impl for<'a> Fn(&'a T) -> &'a F + Send + Sync + 'static,
        encoder: Encoder<F>,
    ) -> Self {
        self.encoder_field(EncoderField::new(field, extract, encoder))
    }

    /// Appends a prepared field.
    #[must_use]
    pub fn encoder_field<F: 'static>(mut self, field: EncoderField<T, F>) -> Self {
        self.fields.push(Box::new(field));
        self
    }

    /// Validates the schema and builds a resolvable record encoder.
    ///
    /// # Errors
    ///
    /// Returns a schema build error for invalid names, or for empty or
    /// duplicate field names.
    pub fn build(self) -> Result<Encoder<T>> {
        let schema = self
            .fields
            .iter()
            .fold(self.schema, |schema, encoder| {
                schema.field(encoder.field().clone())
            })
            .build()?;
        let key = self
            .key
            .unwrap_or_else(|| TypeKey::named(schema.name.full_name()));
        tracing::trace!(%key, fields = schema.fields.len(), "built record definition");

        Ok(Encoder::resolvable(RecordDefinition {
            key,
            schema_for: SchemaFor::new(Schema::from(schema)).with_field_mapper(self.field_mapper),
            fields: self.fields,
        }))
    }
}
