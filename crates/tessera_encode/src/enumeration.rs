//! Named-enumeration assembly.

use std::sync::Arc;

use tessera_schema::{EnumSchema, EnumSymbol, Error, Props, Result, Schema, SchemaFor, Value};

use crate::encoder::{EncodeValue, Encoder};

type SymbolFn<T> = Arc<dyn Fn(&T, &Arc<EnumSchema>) -> Result<Value> + Send + Sync>;

/// Encodes values as symbols of a named enum.
///
/// The symbol produced for each value is checked against the schema's
/// symbol set on every call.
pub struct EnumEncoder<T: 'static> {
    schema_for: SchemaFor,
    schema: Arc<EnumSchema>,
    to_value: SymbolFn<T>,
}

impl<T: 'static> EnumEncoder<T> {
    /// Starts assembling an enum named `name` in `namespace`.
    #[must_use]
    pub fn builder(name: impl Into<String>, namespace: impl Into<String>) -> EnumBuilder<T> {
        EnumBuilder {
            name: name.into(),
            namespace: namespace.into(),
            symbols: Vec::new(),
            doc: None,
            aliases: Vec::new(),
            props: Props::new(),
            default: None,
            _host: std::marker::PhantomData,
        }
    }

    fn with_enum(&self, schema_for: SchemaFor, schema: Arc<EnumSchema>) -> Encoder<T> {
        Encoder::concrete(Self {
            schema_for,
            schema,
            to_value: Arc::clone(&self.to_value),
        })
    }
}

impl<T: 'static> EncodeValue<T> for EnumEncoder<T> {
    fn encode(&self, value: &T) -> Result<Value> {
        (self.to_value)(value, &self.schema)
    }

    fn schema_for(&self) -> &SchemaFor {
        &self.schema_for
    }

    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<T>> {
        match schema_for.schema() {
            Schema::Enum(schema) => {
                let schema = Arc::clone(schema);
                Ok(self.with_enum(schema_for, schema))
            }
            Schema::Ref(name) if self.schema.name == *name => {
                Ok(self.with_enum(self.schema_for.clone(), Arc::clone(&self.schema)))
            }
            _ => Err(Error::schema_override(
                self.schema_for.to_string(),
                schema_for.to_string(),
                "enums can only be replaced by enums",
            )),
        }
    }
}

/// Builder returned by [`EnumEncoder::builder`].
#[derive(Clone, Debug)]
pub struct EnumBuilder<T> {
    name: String,
    namespace: String,
    symbols: Vec<String>,
    doc: Option<String>,
    aliases: Vec<String>,
    props: Props,
    default: Option<String>,
    _host: std::marker::PhantomData<fn(&T)>,
}

impl<T: 'static> EnumBuilder<T> {
    /// Appends symbols, in order.
    #[must_use]
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Sets the enum documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds an enum alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds a custom property.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Sets the symbol readers fall back to.
    #[must_use]
    pub fn default_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.default = Some(symbol.into());
        self
    }

    /// Validates the schema and builds the encoder.
    ///
    /// `to_symbol` maps each value to its symbol.
    ///
    /// # Errors
    ///
    /// Returns a schema build error for invalid names, no symbols, or empty
    /// or duplicate symbols.
    pub fn build<S>(self, to_symbol: impl Fn(&T) -> S + Send + Sync + 'static) -> Result<Encoder<T>>
    where
        S: AsRef<str>,
    {
        let mut builder = EnumSchema::builder(self.name, self.namespace, self.symbols);
        if let Some(doc) = self.doc {
            builder = builder.doc(doc);
        }
        for alias in self.aliases {
            builder = builder.alias(alias);
        }
        for (key, value) in self.props {
            builder = builder.prop(key, value);
        }
        if let Some(default) = self.default {
            builder = builder.default_symbol(default);
        }
        let schema = Arc::new(builder.build()?);
        tracing::trace!(name = %schema.name, symbols = schema.symbols.len(), "built enum encoder");

        Ok(Encoder::concrete(EnumEncoder {
            schema_for: SchemaFor::new(Schema::Enum(Arc::clone(&schema))),
            schema,
            to_value: Arc::new(move |value: &T, schema: &Arc<EnumSchema>| {
                let symbol = to_symbol(value);
                EnumSymbol::new(Arc::clone(schema), symbol.as_ref()).map(Value::Enum)
            }),
        }))
    }
}
