//! The generic representation handed to wire writers.
//!
//! [`Value`] is the only thing an encoder may produce. It is a closed union
//! of the shapes the format understands and carries no host-type identity.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::{EnumSchema, RecordSchema};

/// Generic value produced by encoders.
///
/// Values are immutable and cheaply cloneable for the container variants,
/// which use persistent data structures.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Null.
    Null,
    /// Boolean.
    Boolean(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Variable-length byte sequence.
    Bytes(Vec<u8>),
    /// Fixed-length byte sequence; the length matches the paired schema.
    Fixed(Vec<u8>),
    /// UTF-8 string.
    String(Arc<str>),
    /// Enum symbol bound to its schema.
    Enum(EnumSymbol),
    /// Record bound to its schema.
    Record(Record),
    /// Array of values.
    Array(im::Vector<Value>),
    /// String-keyed map.
    Map(im::OrdMap<Arc<str>, Value>),
    /// Value tagged with the union branch it was written as.
    Union {
        /// Index of the branch in the union schema.
        branch: usize,
        /// The branch value.
        value: Box<Value>,
    },
}

impl Value {
    /// Wraps a value as a union branch.
    #[must_use]
    pub fn union(branch: usize, value: Value) -> Self {
        Self::Union {
            branch,
            value: Box::new(value),
        }
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to extract a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an `int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a `long`.
    #[must_use]
    pub const fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a record.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Attempts to extract an enum symbol.
    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumSymbol> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Attempts to extract array items.
    #[must_use]
    pub const fn as_array(&self) -> Option<&im::Vector<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the branch value of a union, or `self` for any other variant.
    #[must_use]
    pub fn unwrap_union(&self) -> &Value {
        match self {
            Self::Union { value, .. } => value,
            other => other,
        }
    }
}

/// A record value: field values in the order of its schema's fields.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

impl Record {
    /// Creates a record bound to `schema`.
    ///
    /// # Errors
    ///
    /// Returns a value mismatch error if the number of values differs from
    /// the number of schema fields.
    pub fn new(schema: Arc<RecordSchema>, values: Vec<Value>) -> Result<Self> {
        if values.len() != schema.fields.len() {
            return Err(Error::value_mismatch(
                format!("record {}", schema.name),
                format!(
                    "{} fields declared, {} values supplied",
                    schema.fields.len(),
                    values.len()
                ),
            ));
        }
        Ok(Self { schema, values })
    }

    /// Returns the schema this record is bound to.
    #[must_use]
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Returns the value of the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.field_index(name).map(|i| &self.values[i])
    }

    /// Returns the value at a field position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the field names, in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.schema.field_names()
    }

    /// Returns `(field name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.field_names().zip(self.values.iter())
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An enum value: a symbol drawn from its schema's symbol set.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumSymbol {
    schema: Arc<EnumSchema>,
    index: usize,
}

impl EnumSymbol {
    /// Creates an enum value, validating the symbol against the schema.
    ///
    /// # Errors
    ///
    /// Returns an unmapped symbol error if `symbol` is not declared.
    pub fn new(schema: Arc<EnumSchema>, symbol: &str) -> Result<Self> {
        let index = schema
            .index_of(symbol)
            .ok_or_else(|| Error::unmapped_symbol(schema.name.full_name(), symbol))?;
        Ok(Self { schema, index })
    }

    /// Returns the schema this symbol is bound to.
    #[must_use]
    pub fn schema(&self) -> &Arc<EnumSchema> {
        &self.schema
    }

    /// Returns the symbol's position in the schema.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.schema.symbols[self.index]
    }
}

// Implement PartialEq manually to compare floats by bits
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Bytes(a), Self::Bytes(b)) | (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (
                Self::Union {
                    branch: a,
                    value: va,
                },
                Self::Union {
                    branch: b,
                    value: vb,
                },
            ) => a == b && va == vb,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name == other.schema.name
            && self.field_names().eq(other.field_names())
            && self.values == other.values
    }
}

impl Eq for Record {}

impl PartialEq for EnumSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name == other.schema.name && self.symbol() == other.symbol()
    }
}

impl Eq for EnumSymbol {}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Long(n) => write!(f, "{n}L"),
            Self::Float(n) => write!(f, "{n}f"),
            Self::Double(n) => write!(f, "{n}"),
            Self::Bytes(b) => write!(f, "bytes{b:?}"),
            Self::Fixed(b) => write!(f, "fixed{b:?}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Enum(e) => write!(f, "{e:?}"),
            Self::Record(r) => write!(f, "{r:?}"),
            Self::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Map(m) => f.debug_map().entries(m.iter()).finish(),
            Self::Union { branch, value } => write!(f, "#{branch}:{value:?}"),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.schema.name)?;
        let mut map = f.debug_map();
        for (name, value) in self.iter() {
            map.entry(&format_args!("{name}"), value);
        }
        map.finish()
    }
}

impl fmt::Debug for EnumSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.schema.name, self.symbol())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Long(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Double(n) => write!(f, "{n}"),
            Self::Bytes(b) | Self::Fixed(b) => {
                for byte in b {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::String(s) => write!(f, "{s:?}"),
            Self::Enum(e) => write!(f, "{}", e.symbol()),
            Self::Record(r) => write!(f, "{r}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::Union { value, .. } => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Long(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<EnumSymbol> for Value {
    fn from(symbol: EnumSymbol) -> Self {
        Self::Enum(symbol)
    }
}
