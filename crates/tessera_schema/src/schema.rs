//! Schema definitions for records, enums, fixed types, and their building blocks.
//!
//! Schemas are immutable once built. Named schemas are shared behind [`Arc`]
//! so an encoder tree can hand the same schema to every value it produces.
//! All structural validation happens in the builders; a value of any type in
//! this module is already well-formed.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// Key-value properties attached to a named schema.
pub type Props = BTreeMap<String, String>;

// =============================================================================
// Names
// =============================================================================

/// Name of a named schema (record, enum, or fixed).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Name {
    name: Arc<str>,
    namespace: Option<Arc<str>>,
}

impl Name {
    /// Creates a validated name. An empty namespace means "no namespace".
    ///
    /// # Errors
    ///
    /// Returns a schema build error if the name or any namespace segment is
    /// not a valid identifier.
    pub fn new(name: &str, namespace: &str) -> Result<Self> {
        validate_identifier(name, "name")?;
        let namespace = if namespace.is_empty() {
            None
        } else {
            for segment in namespace.split('.') {
                validate_identifier(segment, "namespace segment")?;
            }
            Some(Arc::from(namespace))
        };
        Ok(Self {
            name: Arc::from(name),
            namespace,
        })
    }

    /// Returns the simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns `namespace.name`, or just `name` without a namespace.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.to_string(),
        }
    }

    /// Returns a copy of this name moved into another namespace.
    ///
    /// # Errors
    ///
    /// Returns a schema build error if the namespace is invalid.
    pub fn with_namespace(&self, namespace: &str) -> Result<Self> {
        Self::new(&self.name, namespace)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.full_name())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Checks `[A-Za-z_][A-Za-z0-9_]*`.
fn validate_identifier(ident: &str, what: &str) -> Result<()> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::schema_build(format!("invalid {what}: {ident:?}")))
    }
}

/// Checks aliases for repeats and for clashes with the owner's own name.
fn validate_aliases(owner: &str, aliases: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for alias in aliases {
        validate_identifier(alias, "alias")?;
        if alias == owner {
            return Err(Error::schema_build(format!(
                "alias {alias} conflicts with the name it aliases"
            )));
        }
        if !seen.insert(alias.as_str()) {
            return Err(Error::schema_build(format!(
                "duplicate alias {alias} on {owner}"
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Schema
// =============================================================================

/// The kind of a schema, independent of its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SchemaKind {
    /// `null`
    Null,
    /// `boolean`
    Boolean,
    /// 32-bit `int`
    Int,
    /// 64-bit `long`
    Long,
    /// 32-bit `float`
    Float,
    /// 64-bit `double`
    Double,
    /// Variable-length `bytes`
    Bytes,
    /// UTF-8 `string`
    String,
    /// Fixed-length byte sequence
    Fixed,
    /// Named enumeration
    Enum,
    /// Named record
    Record,
    /// Homogeneous array
    Array,
    /// String-keyed map
    Map,
    /// Tagged union
    Union,
    /// Reference to a named schema defined elsewhere
    Ref,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Fixed => "fixed",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::Array => "array",
            Self::Map => "map",
            Self::Union => "union",
            Self::Ref => "ref",
        };
        f.write_str(name)
    }
}

/// A schema value.
///
/// Cloning is cheap: named schemas are reference counted and the remaining
/// variants are small.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Schema {
    /// The null schema.
    Null,
    /// Boolean schema.
    Boolean,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Variable-length bytes.
    Bytes,
    /// UTF-8 string.
    String,
    /// Fixed-length bytes.
    Fixed(Arc<FixedSchema>),
    /// Named enumeration.
    Enum(Arc<EnumSchema>),
    /// Named record.
    Record(Arc<RecordSchema>),
    /// Array with the given item schema.
    Array(Box<Schema>),
    /// String-keyed map with the given value schema.
    Map(Box<Schema>),
    /// Union of the given branches, in branch order.
    Union(Vec<Schema>),
    /// Reference to a named schema; used for recursive fields.
    Ref(Name),
}

impl Schema {
    /// Creates an array schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::Array(Box::new(items))
    }

    /// Creates a map schema.
    #[must_use]
    pub fn map(values: Schema) -> Self {
        Self::Map(Box::new(values))
    }

    /// Creates a `[null, inner]` union.
    ///
    /// If `inner` is already a union, `null` is prepended unless present.
    #[must_use]
    pub fn optional(inner: Schema) -> Self {
        match inner {
            Self::Union(branches) if branches.contains(&Self::Null) => Self::Union(branches),
            Self::Union(mut branches) => {
                branches.insert(0, Self::Null);
                Self::Union(branches)
            }
            other => Self::Union(vec![Self::Null, other]),
        }
    }

    /// Creates a validated union.
    ///
    /// # Errors
    ///
    /// Returns a schema build error for an empty union, a directly nested
    /// union, or two branches of the same unnamed kind or the same name.
    pub fn union(branches: Vec<Schema>) -> Result<Self> {
        if branches.is_empty() {
            return Err(Error::schema_build("union must have at least one branch"));
        }
        let mut kinds = HashSet::new();
        let mut names = HashSet::new();
        for branch in &branches {
            if branch.kind() == SchemaKind::Union {
                return Err(Error::schema_build("unions may not directly contain unions"));
            }
            let unique = match branch.full_name() {
                Some(name) => names.insert(name),
                None => kinds.insert(branch.kind()),
            };
            if !unique {
                return Err(Error::schema_build(format!(
                    "duplicate union branch {branch}"
                )));
            }
        }
        Ok(Self::Union(branches))
    }

    /// Returns the kind of this schema.
    #[must_use]
    pub const fn kind(&self) -> SchemaKind {
        match self {
            Self::Null => SchemaKind::Null,
            Self::Boolean => SchemaKind::Boolean,
            Self::Int => SchemaKind::Int,
            Self::Long => SchemaKind::Long,
            Self::Float => SchemaKind::Float,
            Self::Double => SchemaKind::Double,
            Self::Bytes => SchemaKind::Bytes,
            Self::String => SchemaKind::String,
            Self::Fixed(_) => SchemaKind::Fixed,
            Self::Enum(_) => SchemaKind::Enum,
            Self::Record(_) => SchemaKind::Record,
            Self::Array(_) => SchemaKind::Array,
            Self::Map(_) => SchemaKind::Map,
            Self::Union(_) => SchemaKind::Union,
            Self::Ref(_) => SchemaKind::Ref,
        }
    }

    /// Returns the name of a named schema or reference.
    #[must_use]
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::Fixed(f) => Some(&f.name),
            Self::Enum(e) => Some(&e.name),
            Self::Record(r) => Some(&r.name),
            Self::Ref(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the namespace of a named schema or reference.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.name().and_then(Name::namespace)
    }

    /// Returns the full name of a named schema or reference.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        self.name().map(Name::full_name)
    }

    /// Returns the record schema, if this is a record.
    #[must_use]
    pub fn as_record(&self) -> Option<&Arc<RecordSchema>> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the enum schema, if this is an enum.
    #[must_use]
    pub fn as_enum(&self) -> Option<&Arc<EnumSchema>> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the fixed schema, if this is a fixed type.
    #[must_use]
    pub fn as_fixed(&self) -> Option<&Arc<FixedSchema>> {
        match self {
            Self::Fixed(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the record fields, or an empty slice for other kinds.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Record(r) => &r.fields,
            _ => &[],
        }
    }

    /// Returns the enum symbols, or an empty slice for other kinds.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        match self {
            Self::Enum(e) => &e.symbols,
            _ => &[],
        }
    }

    /// Returns true if this schema admits `null`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Union(branches) => branches.contains(&Self::Null),
            _ => false,
        }
    }

    /// Returns true if this is the named schema `name` or a reference to it.
    #[must_use]
    pub fn refers_to(&self, name: &Name) -> bool {
        self.name() == Some(name)
    }

    /// Returns this schema with every reference to `from` pointing at `to`.
    ///
    /// Descends through arrays, maps, unions and nested record fields. A
    /// nested definition named `from` shadows the rename below it.
    #[must_use]
    pub fn rename_refs(&self, from: &Name, to: &Name) -> Self {
        match self {
            Self::Ref(name) if name == from => Self::Ref(to.clone()),
            Self::Array(items) => Self::array(items.rename_refs(from, to)),
            Self::Map(values) => Self::map(values.rename_refs(from, to)),
            Self::Union(branches) => Self::Union(
                branches
                    .iter()
                    .map(|branch| branch.rename_refs(from, to))
                    .collect(),
            ),
            Self::Record(r) if r.name != *from => Self::Record(Arc::new(r.rename_refs(from, to))),
            other => other.clone(),
        }
    }

    /// Records every fixed and enum definition in this schema under its name.
    ///
    /// Descends through arrays, maps, unions and record fields.
    pub fn collect_named(&self, into: &mut HashMap<Name, Schema>) {
        match self {
            Self::Fixed(f) => {
                into.insert(f.name.clone(), self.clone());
            }
            Self::Enum(e) => {
                into.insert(e.name.clone(), self.clone());
            }
            Self::Array(inner) | Self::Map(inner) => inner.collect_named(into),
            Self::Union(branches) => {
                for branch in branches {
                    branch.collect_named(into);
                }
            }
            Self::Record(r) => {
                for field in &r.fields {
                    field.schema.collect_named(into);
                }
            }
            _ => {}
        }
    }

    /// Returns this schema with references to `named` definitions replaced
    /// by the definitions themselves.
    ///
    /// Named records are left as they are.
    #[must_use]
    pub fn expand_refs(&self, named: &HashMap<Name, Schema>) -> Self {
        match self {
            Self::Ref(name) => named.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::Array(items) => Self::array(items.expand_refs(named)),
            Self::Map(values) => Self::map(values.expand_refs(named)),
            Self::Union(branches) => {
                Self::Union(branches.iter().map(|b| b.expand_refs(named)).collect())
            }
            other => other.clone(),
        }
    }

    /// Returns this schema moved into another namespace.
    ///
    /// Only the outer named schema changes; field and item schemas are kept.
    ///
    /// # Errors
    ///
    /// Returns a schema build error if this schema is unnamed or the
    /// namespace is invalid.
    pub fn with_namespace(&self, namespace: &str) -> Result<Self> {
        match self {
            Self::Record(r) => {
                let mut record = RecordSchema::clone(r);
                record.name = r.name.with_namespace(namespace)?;
                Ok(Self::Record(Arc::new(record)))
            }
            Self::Enum(e) => {
                let mut schema = EnumSchema::clone(e);
                schema.name = e.name.with_namespace(namespace)?;
                Ok(Self::Enum(Arc::new(schema)))
            }
            Self::Fixed(f) => {
                let mut fixed = FixedSchema::clone(f);
                fixed.name = f.name.with_namespace(namespace)?;
                Ok(Self::Fixed(Arc::new(fixed)))
            }
            Self::Ref(name) => Ok(Self::Ref(name.with_namespace(namespace)?)),
            other => Err(Error::schema_build(format!(
                "{} schemas have no namespace",
                other.kind()
            ))),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(fixed) => write!(f, "fixed {}({})", fixed.name, fixed.size),
            Self::Enum(e) => write!(f, "enum {}", e.name),
            Self::Record(r) => write!(f, "record {}", r.name),
            Self::Array(items) => write!(f, "array<{items}>"),
            Self::Map(values) => write!(f, "map<{values}>"),
            Self::Union(branches) => {
                write!(f, "union[")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{branch}")?;
                }
                write!(f, "]")
            }
            Self::Ref(name) => write!(f, "ref {name}"),
            other => write!(f, "{}", other.kind()),
        }
    }
}

impl From<RecordSchema> for Schema {
    fn from(record: RecordSchema) -> Self {
        Self::Record(Arc::new(record))
    }
}

impl From<EnumSchema> for Schema {
    fn from(schema: EnumSchema) -> Self {
        Self::Enum(Arc::new(schema))
    }
}

impl From<FixedSchema> for Schema {
    fn from(fixed: FixedSchema) -> Self {
        Self::Fixed(Arc::new(fixed))
    }
}

// =============================================================================
// Records
// =============================================================================

/// Schema definition for a record field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field schema.
    pub schema: Schema,
    /// Documentation.
    pub doc: Option<String>,
    /// Alternative names for this field.
    pub aliases: Vec<String>,
    /// Default value used by readers when the field is absent.
    pub default: Option<Value>,
}

impl Field {
    /// Creates a field with no documentation, aliases, or default.
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            doc: None,
            aliases: Vec::new(),
            default: None,
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Schema definition for a named record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordSchema {
    /// Record name.
    pub name: Name,
    /// Documentation.
    pub doc: Option<String>,
    /// Alternative names for this record.
    pub aliases: Vec<String>,
    /// Custom properties.
    pub props: Props,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl RecordSchema {
    /// Starts building a record schema.
    #[must_use]
    pub fn builder(name: impl Into<String>, namespace: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            namespace: namespace.into(),
            doc: None,
            aliases: Vec::new(),
            props: Props::new(),
            fields: Vec::new(),
        }
    }

    /// Returns the field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the position of the field with the given name.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns a copy with the field at `index` renamed.
    ///
    /// # Errors
    ///
    /// Returns a schema build error if `index` is out of bounds or the new
    /// name is invalid or already taken.
    pub fn with_field_name(&self, index: usize, name: &str) -> Result<Self> {
        validate_identifier(name, "field name")?;
        if index >= self.fields.len() {
            return Err(Error::schema_build(format!(
                "record {} has no field #{index}",
                self.name
            )));
        }
        if self
            .fields
            .iter()
            .enumerate()
            .any(|(i, f)| i != index && f.name == name)
        {
            return Err(Error::schema_build(format!(
                "duplicate field {name} in record {}",
                self.name
            )));
        }
        let mut record = self.clone();
        record.fields[index].name = name.to_string();
        Ok(record)
    }

    /// Returns a copy whose field schemas refer to `to` wherever they referred to `from`.
    #[must_use]
    pub fn rename_refs(&self, from: &Name, to: &Name) -> Self {
        let mut record = self.clone();
        for field in &mut record.fields {
            field.schema = field.schema.rename_refs(from, to);
        }
        record
    }
}

/// Builder for [`RecordSchema`].
#[derive(Clone, Debug)]
pub struct RecordSchemaBuilder {
    name: String,
    namespace: String,
    doc: Option<String>,
    aliases: Vec<String>,
    props: Props,
    fields: Vec<Field>,
}

impl RecordSchemaBuilder {
    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds an alias.
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

    /// Appends a field. Field order is the record's canonical order.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Validates and builds the record schema.
    ///
    /// # Errors
    ///
    /// Returns a schema build error for invalid names, empty or duplicate
    /// field names, or conflicting aliases.
    pub fn build(self) -> Result<RecordSchema> {
        let name = Name::new(&self.name, &self.namespace)?;
        validate_aliases(&self.name, &self.aliases)?;

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(Error::schema_build(format!(
                    "record {name} has a field with an empty name"
                )));
            }
            validate_identifier(&field.name, "field name")?;
            if !seen.insert(field.name.as_str()) {
                return Err(Error::schema_build(format!(
                    "duplicate field {} in record {name}",
                    field.name
                )));
            }
            validate_aliases(&field.name, &field.aliases)?;
        }

        Ok(RecordSchema {
            name,
            doc: self.doc,
            aliases: self.aliases,
            props: self.props,
            fields: self.fields,
        })
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Schema definition for a named enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumSchema {
    /// Enum name.
    pub name: Name,
    /// Documentation.
    pub doc: Option<String>,
    /// Alternative names for this enum.
    pub aliases: Vec<String>,
    /// Custom properties.
    pub props: Props,
    /// Symbols in declaration order, duplicate-free.
    pub symbols: Vec<String>,
    /// Symbol readers fall back to for unknown symbols.
    pub default: Option<String>,
}

impl EnumSchema {
    /// Starts building an enum schema.
    #[must_use]
    pub fn builder<I, S>(
        name: impl Into<String>,
        namespace: impl Into<String>,
        symbols: I,
    ) -> EnumSchemaBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumSchemaBuilder {
            name: name.into(),
            namespace: namespace.into(),
            doc: None,
            aliases: Vec::new(),
            props: Props::new(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            default: None,
        }
    }

    /// Returns the position of `symbol`.
    #[must_use]
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }
}

/// Builder for [`EnumSchema`].
#[derive(Clone, Debug)]
pub struct EnumSchemaBuilder {
    name: String,
    namespace: String,
    doc: Option<String>,
    aliases: Vec<String>,
    props: Props,
    symbols: Vec<String>,
    default: Option<String>,
}

impl EnumSchemaBuilder {
    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds an alias.
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

    /// Sets the default symbol.
    #[must_use]
    pub fn default_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.default = Some(symbol.into());
        self
    }

    /// Validates and builds the enum schema.
    ///
    /// # Errors
    ///
    /// Returns a schema build error for invalid names, no symbols, empty or
    /// duplicate symbols, a default outside the symbol set, or conflicting
    /// aliases.
    pub fn build(self) -> Result<EnumSchema> {
        let name = Name::new(&self.name, &self.namespace)?;
        validate_aliases(&self.name, &self.aliases)?;

        if self.symbols.is_empty() {
            return Err(Error::schema_build(format!("enum {name} has no symbols")));
        }
        let mut seen = HashSet::new();
        for symbol in &self.symbols {
            validate_identifier(symbol, "symbol")?;
            if !seen.insert(symbol.as_str()) {
                return Err(Error::schema_build(format!(
                    "duplicate symbol {symbol} in enum {name}"
                )));
            }
        }
        if let Some(default) = &self.default {
            if !seen.contains(default.as_str()) {
                return Err(Error::schema_build(format!(
                    "default symbol {default} is not declared by enum {name}"
                )));
            }
        }

        Ok(EnumSchema {
            name,
            doc: self.doc,
            aliases: self.aliases,
            props: self.props,
            symbols: self.symbols,
            default: self.default,
        })
    }
}

// =============================================================================
// Fixed
// =============================================================================

/// Schema definition for a named fixed-length byte sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedSchema {
    /// Fixed name.
    pub name: Name,
    /// Documentation.
    pub doc: Option<String>,
    /// Alternative names.
    pub aliases: Vec<String>,
    /// Length in bytes.
    pub size: usize,
}

impl FixedSchema {
    /// Creates a validated fixed schema.
    ///
    /// # Errors
    ///
    /// Returns a schema build error if the name or namespace is invalid.
    pub fn new(name: &str, namespace: &str, size: usize) -> Result<Self> {
        Ok(Self {
            name: Name::new(name, namespace)?,
            doc: None,
            aliases: Vec::new(),
            size,
        })
    }

    /// Sets the documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}
