//! The encoder capability and the resolution protocol.
//!
//! An [`Encoder<T>`] is either concrete, ready to encode, or resolvable: it
//! must be resolved against a [`DefinitionEnvironment`] before it can
//! safely describe a type that refers back to itself.
//!
//! Resolution order matters. A resolvable encoder always handles the
//! resolution itself, even when a schema replacement is pending, because
//! only it knows how to thread the replacement past recursive occurrences.
//! A concrete encoder accepts a replacement by way of
//! [`EncodeValue::with_schema`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use tessera_schema::{Result, SchemaFor, Value};

use crate::delegate::{self, Projection};
use crate::env::DefinitionEnvironment;
use crate::update::SchemaUpdate;

/// A concrete encoder for values of type `T`.
pub trait EncodeValue<T>: Send + Sync {
    /// Encodes a value into the generic representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented by this
    /// encoder's schema.
    fn encode(&self, value: &T) -> Result<Value>;

    /// Returns the schema this encoder emits values for.
    fn schema_for(&self) -> &SchemaFor;

    /// Returns an encoder that reports `schema_for` and emits values of its shape.
    ///
    /// The receiver is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a schema override error if the encoder cannot produce values
    /// of the replacement's shape.
    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<T>>;
}

/// An encoder that must be resolved before use.
pub trait ResolveEncoder<T>: Send + Sync {
    /// Produces the resolved encoder within `env`, applying `update`.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder or one of its children cannot be
    /// resolved, or if `update` is incompatible.
    fn encoder(
        self: Arc<Self>,
        env: &DefinitionEnvironment,
        update: &SchemaUpdate,
    ) -> Result<Encoder<T>>;
}

/// A resolvable encoder with a cached ad-hoc instance.
///
/// The ad-hoc instance is what an unresolved encoder uses when asked to
/// encode directly. It is built once, against an empty environment.
pub struct Resolvable<T: 'static> {
    resolver: Arc<dyn ResolveEncoder<T>>,
    adhoc: OnceLock<Encoder<T>>,
}

impl<T: 'static> Resolvable<T> {
    fn adhoc_instance(&self) -> Result<&Encoder<T>> {
        if let Some(encoder) = self.adhoc.get() {
            return Ok(encoder);
        }
        tracing::debug!(
            target_type = std::any::type_name::<T>(),
            "building ad-hoc encoder instance"
        );
        let built = Arc::clone(&self.resolver)
            .encoder(&DefinitionEnvironment::new(), &SchemaUpdate::NoUpdate)?;
        // Racing first users may each build one; the first stored instance wins.
        Ok(self.adhoc.get_or_init(|| built))
    }
}

/// Encoder for values of type `T`.
///
/// Cloning is cheap; encoders are immutable and may be shared across threads.
pub enum Encoder<T: 'static> {
    /// Ready to encode.
    Concrete(Arc<dyn EncodeValue<T>>),
    /// Must be resolved; falls back to its ad-hoc instance when used directly.
    Resolvable(Arc<Resolvable<T>>),
}

impl<T: 'static> Encoder<T> {
    /// Wraps a concrete encoder.
    pub fn concrete(encoder: impl EncodeValue<T> + 'static) -> Self {
        Self::Concrete(Arc::new(encoder))
    }

    /// Wraps a resolver.
    pub fn resolvable(resolver: impl ResolveEncoder<T> + 'static) -> Self {
        Self::Resolvable(Arc::new(Resolvable {
            resolver: Arc::new(resolver),
            adhoc: OnceLock::new(),
        }))
    }

    /// Creates a reference to an encoder built on demand at resolution time.
    ///
    /// This is how a field names its own type, or a type in a cycle with
    /// it, without constructing that type's encoder eagerly.
    pub fn lazy(make: impl Fn() -> Encoder<T> + Send + Sync + 'static) -> Self {
        Self::resolvable(Lazy {
            make: Box::new(make),
        })
    }

    /// Returns true if this encoder must be resolved before sharing-safe use.
    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        matches!(self, Self::Resolvable(_))
    }

    /// Encodes a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not fit the schema, or if an
    /// unresolved encoder fails to build its ad-hoc instance.
    pub fn encode(&self, value: &T) -> Result<Value> {
        match self {
            Self::Concrete(encoder) => encoder.encode(value),
            Self::Resolvable(r) => r.adhoc_instance()?.encode(value),
        }
    }

    /// Returns the schema this encoder emits values for.
    ///
    /// # Errors
    ///
    /// Returns an error if an unresolved encoder fails to build its ad-hoc instance.
    pub fn schema_for(&self) -> Result<SchemaFor> {
        match self {
            Self::Concrete(encoder) => Ok(encoder.schema_for().clone()),
            Self::Resolvable(r) => r.adhoc_instance()?.schema_for(),
        }
    }

    /// Returns an encoder reporting `schema_for`; see [`EncodeValue::with_schema`].
    ///
    /// # Errors
    ///
    /// Returns a schema override error if the replacement is incompatible.
    pub fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<T>> {
        match self {
            Self::Concrete(encoder) => encoder.with_schema(schema_for),
            Self::Resolvable(r) => r.adhoc_instance()?.with_schema(schema_for),
        }
    }

    /// Resolves this encoder against an empty environment without an update.
    ///
    /// The result shares one encoder per definition along each path of the
    /// tree and is safe for recursive types.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while resolving any part of the tree,
    /// with `T` recorded as its source.
    pub fn resolve_encoder(&self) -> Result<Encoder<T>> {
        self.resolve_in(&DefinitionEnvironment::new(), &SchemaUpdate::NoUpdate)
            .map_err(|err| err.with_source(std::any::type_name::<T>()))
    }

    /// Resolves this encoder within `env`, applying `update`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while resolving any part of the tree.
    pub fn resolve_in(
        &self,
        env: &DefinitionEnvironment,
        update: &SchemaUpdate,
    ) -> Result<Encoder<T>> {
        match (self, update) {
            (Self::Resolvable(r), _) => Arc::clone(&r.resolver).encoder(env, update),
            (Self::Concrete(encoder), SchemaUpdate::FullSchema(sf)) => {
                encoder.with_schema(sf.clone())
            }
            (Self::Concrete(_), SchemaUpdate::NoUpdate) => Ok(self.clone()),
        }
    }

    /// Returns an encoder for `S` that maps through `f` and delegates to this one.
    ///
    /// The schema is unchanged.
    pub fn comap<S: 'static>(&self, f: impl Fn(&S) -> T + Send + Sync + 'static) -> Encoder<S> {
        delegate::delegate(self.clone(), Projection::Owned(Arc::new(f)))
    }

    /// Like [`Encoder::comap`], for projections that borrow from the source value.
    pub fn comap_ref<S: 'static>(
        &self,
        f: impl for<'a> Fn(&'a S) -> &'a T + Send + Sync + 'static,
    ) -> Encoder<S> {
        delegate::delegate(self.clone(), Projection::Borrowed(Arc::new(f)))
    }

    /// Returns the concrete encoder, falling back to the ad-hoc instance.
    pub(crate) fn into_concrete(self) -> Result<Arc<dyn EncodeValue<T>>> {
        match self {
            Self::Concrete(encoder) => Ok(encoder),
            Self::Resolvable(r) => r.adhoc_instance()?.clone().into_concrete(),
        }
    }
}

impl<T: 'static> Clone for Encoder<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Concrete(encoder) => Self::Concrete(Arc::clone(encoder)),
            Self::Resolvable(r) => Self::Resolvable(Arc::clone(r)),
        }
    }
}

impl<T: 'static> fmt::Debug for Encoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(encoder) => write!(f, "Encoder::Concrete({})", encoder.schema_for()),
            Self::Resolvable(r) => match r.adhoc.get() {
                Some(adhoc) => write!(f, "Encoder::Resolvable({adhoc:?})"),
                None => write!(f, "Encoder::Resolvable(<unresolved>)"),
            },
        }
    }
}

/// Resolver behind [`Encoder::lazy`].
struct Lazy<T: 'static> {
    make: Box<dyn Fn() -> Encoder<T> + Send + Sync>,
}

impl<T: 'static> ResolveEncoder<T> for Lazy<T> {
    fn encoder(
        self: Arc<Self>,
        env: &DefinitionEnvironment,
        update: &SchemaUpdate,
    ) -> Result<Encoder<T>> {
        tracing::trace!(
            target_type = std::any::type_name::<T>(),
            bound = env.len(),
            "resolving lazy encoder"
        );
        (self.make)().resolve_in(env, update)
    }
}
