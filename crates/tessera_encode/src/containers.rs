//! Container encoders: options, arrays, maps, and boxes.
//!
//! A container whose item encoder is resolvable is itself resolvable, so
//! that the environment and any schema replacement reach the item. A
//! replacement is narrowed to the item schema on the way down.

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use tessera_schema::{Error, Result, Schema, SchemaFor, Value};

use crate::encoder::{EncodeValue, Encoder, ResolveEncoder};
use crate::env::DefinitionEnvironment;
use crate::primitives::Encodable;
use crate::update::SchemaUpdate;

/// Recipe shared by the concrete and resolvable forms of a container.
struct Shape<I: 'static, O: 'static> {
    /// Narrows a container schema to the item schema.
    narrow: fn(&SchemaFor) -> Result<SchemaFor>,
    /// Builds the container around a resolved item, deriving its schema.
    wrap: fn(Arc<dyn EncodeValue<I>>) -> Encoder<O>,
    /// Builds the container around a resolved item under a given schema.
    rebuild: fn(Arc<dyn EncodeValue<I>>, &SchemaFor) -> Result<Encoder<O>>,
}

impl<I: 'static, O: 'static> Clone for Shape<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: 'static, O: 'static> Copy for Shape<I, O> {}

impl<I: 'static, O: 'static> Shape<I, O> {
    fn lift(self, item: Encoder<I>) -> Encoder<O> {
        match item {
            Encoder::Concrete(item) => (self.wrap)(item),
            resolvable @ Encoder::Resolvable(_) => Encoder::resolvable(Lifted {
                item: resolvable,
                shape: self,
            }),
        }
    }

    fn with_schema(
        self,
        item: &Arc<dyn EncodeValue<I>>,
        schema_for: &SchemaFor,
    ) -> Result<Encoder<O>> {
        let item = item.with_schema((self.narrow)(schema_for)?)?.into_concrete()?;
        (self.rebuild)(item, schema_for)
    }
}

/// Container whose item still needs resolving.
struct Lifted<I: 'static, O: 'static> {
    item: Encoder<I>,
    shape: Shape<I, O>,
}

impl<I: 'static, O: 'static> ResolveEncoder<O> for Lifted<I, O> {
    fn encoder(
        self: Arc<Self>,
        env: &DefinitionEnvironment,
        update: &SchemaUpdate,
    ) -> Result<Encoder<O>> {
        let item_update = update.narrow(self.shape.narrow)?;
        let item = self.item.resolve_in(env, &item_update)?.into_concrete()?;
        match update.schema_for() {
            Some(sf) => (self.shape.rebuild)(item, sf),
            None => Ok((self.shape.wrap)(item)),
        }
    }
}

fn override_error(expected: &str, actual: &SchemaFor, reason: &str) -> Error {
    Error::schema_override(expected, actual.to_string(), reason)
}

// =============================================================================
// Option
// =============================================================================

/// Encodes `Option<T>` as a union of null and the item schema.
struct OptionEncoder<T: 'static> {
    schema_for: SchemaFor,
    item: Arc<dyn EncodeValue<T>>,
    null_branch: usize,
    value_branch: usize,
}

/// Finds the null branch and the value branch of a two-branch nullable union.
fn split_optional(schema_for: &SchemaFor) -> Result<(usize, usize, SchemaFor)> {
    let reason = "options need a union of null and exactly one other branch";
    let Schema::Union(branches) = schema_for.schema() else {
        return Err(override_error("union[null, _]", schema_for, reason));
    };
    match branches.as_slice() {
        [Schema::Null, other] if *other != Schema::Null => {
            Ok((0, 1, schema_for.for_field(other.clone())))
        }
        [other, Schema::Null] if *other != Schema::Null => {
            Ok((1, 0, schema_for.for_field(other.clone())))
        }
        _ => Err(override_error("union[null, _]", schema_for, reason)),
    }
}

fn option_shape<T: 'static>() -> Shape<T, Option<T>> {
    Shape {
        narrow: |sf| split_optional(sf).map(|(_, _, item)| item),
        wrap: |item| {
            let schema = Schema::optional(item.schema_for().schema().clone());
            let schema_for = item.schema_for().for_field(schema);
            Encoder::concrete(OptionEncoder {
                schema_for,
                item,
                null_branch: 0,
                value_branch: 1,
            })
        },
        rebuild: |item, sf| {
            let (null_branch, value_branch, _) = split_optional(sf)?;
            Ok(Encoder::concrete(OptionEncoder {
                schema_for: sf.clone(),
                item,
                null_branch,
                value_branch,
            }))
        },
    }
}

impl<T: 'static> EncodeValue<Option<T>> for OptionEncoder<T> {
    fn encode(&self, value: &Option<T>) -> Result<Value> {
        match value {
            None => Ok(Value::union(self.null_branch, Value::Null)),
            Some(inner) => Ok(Value::union(self.value_branch, self.item.encode(inner)?)),
        }
    }

    fn schema_for(&self) -> &SchemaFor {
        &self.schema_for
    }

    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<Option<T>>> {
        option_shape().with_schema(&self.item, &schema_for)
    }
}

/// Encoder for `Option<T>` around `item`.
#[must_use]
pub fn option<T: 'static>(item: Encoder<T>) -> Encoder<Option<T>> {
    option_shape().lift(item)
}

// =============================================================================
// Arrays
// =============================================================================

struct ArrayEncoder<T: 'static> {
    schema_for: SchemaFor,
    item: Arc<dyn EncodeValue<T>>,
}

fn narrow_array(schema_for: &SchemaFor) -> Result<SchemaFor> {
    match schema_for.schema() {
        Schema::Array(items) => Ok(schema_for.for_field((**items).clone())),
        _ => Err(override_error("array", schema_for, "sequences need an array schema")),
    }
}

fn array_shape<T: 'static>() -> Shape<T, Vec<T>> {
    Shape {
        narrow: narrow_array,
        wrap: |item| {
            let schema_for = item
                .schema_for()
                .for_field(Schema::array(item.schema_for().schema().clone()));
            Encoder::concrete(ArrayEncoder { schema_for, item })
        },
        rebuild: |item, sf| {
            Ok(Encoder::concrete(ArrayEncoder {
                schema_for: sf.clone(),
                item,
            }))
        },
    }
}

impl<T: 'static> EncodeValue<Vec<T>> for ArrayEncoder<T> {
    fn encode(&self, value: &Vec<T>) -> Result<Value> {
        let items = value
            .iter()
            .map(|item| self.item.encode(item))
            .collect::<Result<im::Vector<_>>>()?;
        Ok(Value::Array(items))
    }

    fn schema_for(&self) -> &SchemaFor {
        &self.schema_for
    }

    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<Vec<T>>> {
        array_shape().with_schema(&self.item, &schema_for)
    }
}

/// Encoder for `Vec<T>` around `item`.
#[must_use]
pub fn array<T: 'static>(item: Encoder<T>) -> Encoder<Vec<T>> {
    array_shape().lift(item)
}

// =============================================================================
// Maps
// =============================================================================

/// String-keyed maps that can be encoded as map values.
pub trait StringMap<T: 'static>: 'static {
    /// Returns the entries, in any order.
    fn entries(&self) -> impl Iterator<Item = (&str, &T)>;
}

impl<T: 'static, S: 'static> StringMap<T> for HashMap<String, T, S> {
    fn entries(&self) -> impl Iterator<Item = (&str, &T)> {
        self.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<T: 'static> StringMap<T> for BTreeMap<String, T> {
    fn entries(&self) -> impl Iterator<Item = (&str, &T)> {
        self.iter().map(|(k, v)| (k.as_str(), v))
    }
}

struct MapEncoder<M, T: 'static> {
    schema_for: SchemaFor,
    item: Arc<dyn EncodeValue<T>>,
    _map: PhantomData<fn(&M)>,
}

fn narrow_map(schema_for: &SchemaFor) -> Result<SchemaFor> {
    match schema_for.schema() {
        Schema::Map(values) => Ok(schema_for.for_field((**values).clone())),
        _ => Err(override_error("map", schema_for, "string-keyed maps need a map schema")),
    }
}

fn map_shape<M: StringMap<T>, T: 'static>() -> Shape<T, M> {
    Shape {
        narrow: narrow_map,
        wrap: |item| {
            let schema_for = item
                .schema_for()
                .for_field(Schema::map(item.schema_for().schema().clone()));
            Encoder::concrete(MapEncoder::<M, T> {
                schema_for,
                item,
                _map: PhantomData,
            })
        },
        rebuild: |item, sf| {
            Ok(Encoder::concrete(MapEncoder::<M, T> {
                schema_for: sf.clone(),
                item,
                _map: PhantomData,
            }))
        },
    }
}

impl<M: StringMap<T>, T: 'static> EncodeValue<M> for MapEncoder<M, T> {
    fn encode(&self, value: &M) -> Result<Value> {
        let entries = value
            .entries()
            .map(|(key, item)| Ok((Arc::from(key), self.item.encode(item)?)))
            .collect::<Result<im::OrdMap<_, _>>>()?;
        Ok(Value::Map(entries))
    }

    fn schema_for(&self) -> &SchemaFor {
        &self.schema_for
    }

    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<M>> {
        map_shape::<M, T>().with_schema(&self.item, &schema_for)
    }
}

/// Encoder for a string-keyed map around `item`.
#[must_use]
pub fn map<M: StringMap<T>, T: 'static>(item: Encoder<T>) -> Encoder<M> {
    map_shape::<M, T>().lift(item)
}

// =============================================================================
// Box
// =============================================================================

/// Encoder for `Box<T>` delegating to `item`.
#[must_use]
pub fn boxed<T: 'static>(item: Encoder<T>) -> Encoder<Box<T>> {
    item.comap_ref(|b: &Box<T>| &**b)
}

// =============================================================================
// Default encoders
// =============================================================================

impl<T: Encodable> Encodable for Option<T> {
    fn encoder() -> Encoder<Self> {
        option(T::encoder())
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encoder() -> Encoder<Self> {
        array(T::encoder())
    }
}

impl<T: Encodable> Encodable for HashMap<String, T> {
    fn encoder() -> Encoder<Self> {
        map(T::encoder())
    }
}

impl<T: Encodable> Encodable for BTreeMap<String, T> {
    fn encoder() -> Encoder<Self> {
        map(T::encoder())
    }
}

impl<T: Encodable> Encodable for Box<T> {
    fn encoder() -> Encoder<Self> {
        boxed(T::encoder())
    }
}
