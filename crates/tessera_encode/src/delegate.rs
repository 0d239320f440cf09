//! Delegating encoders built by [`Encoder::comap`] and [`Encoder::comap_ref`].
//!
//! A delegate owns its inner encoder. Replacing the delegate's schema
//! replaces the inner encoder's schema, so a nested override is honored in
//! the emitted values and not just in the reported schema.

use std::sync::Arc;

use tessera_schema::{Result, SchemaFor, Value};

use crate::encoder::{EncodeValue, Encoder, ResolveEncoder};
use crate::env::DefinitionEnvironment;
use crate::update::SchemaUpdate;

type OwnedFn<S, T> = Arc<dyn Fn(&S) -> T + Send + Sync>;
type BorrowedFn<S, T> = Arc<dyn for<'a> Fn(&'a S) -> &'a T + Send + Sync>;

/// How a delegate reaches the inner value.
pub(crate) enum Projection<S, T> {
    /// Builds a new inner value.
    Owned(OwnedFn<S, T>),
    /// Borrows the inner value from the source value.
    Borrowed(BorrowedFn<S, T>),
}

impl<S, T> Clone for Projection<S, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Owned(f) => Self::Owned(Arc::clone(f)),
            Self::Borrowed(f) => Self::Borrowed(Arc::clone(f)),
        }
    }
}

/// Wraps `inner`, staying resolvable if `inner` is.
pub(crate) fn delegate<S: 'static, T: 'static>(
    inner: Encoder<T>,
    project: Projection<S, T>,
) -> Encoder<S> {
    match inner {
        Encoder::Concrete(inner) => Encoder::concrete(Comap {
            schema_for: inner.schema_for().clone(),
            inner,
            project,
        }),
        resolvable @ Encoder::Resolvable(_) => Encoder::resolvable(ComapResolver {
            inner: resolvable,
            project,
        }),
    }
}

/// Concrete delegate.
struct Comap<S, T: 'static> {
    schema_for: SchemaFor,
    inner: Arc<dyn EncodeValue<T>>,
    project: Projection<S, T>,
}

impl<S: 'static, T: 'static> EncodeValue<S> for Comap<S, T> {
    fn encode(&self, value: &S) -> Result<Value> {
        match &self.project {
            Projection::Owned(f) => self.inner.encode(&f(value)),
            Projection::Borrowed(f) => self.inner.encode(f(value)),
        }
    }

    fn schema_for(&self) -> &SchemaFor {
        &self.schema_for
    }

    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<S>> {
        let inner = self.inner.with_schema(schema_for)?;
        Ok(delegate(inner, self.project.clone()))
    }
}

/// Delegate whose inner encoder still needs resolving.
struct ComapResolver<S, T: 'static> {
    inner: Encoder<T>,
    project: Projection<S, T>,
}

impl<S: 'static, T: 'static> ResolveEncoder<S> for ComapResolver<S, T> {
    fn encoder(
        self: Arc<Self>,
        env: &DefinitionEnvironment,
        update: &SchemaUpdate,
    ) -> Result<Encoder<S>> {
        let inner = self.inner.resolve_in(env, update)?;
        Ok(delegate(inner, self.project.clone()))
    }
}
