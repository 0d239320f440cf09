//! Definition environments: per-resolution memo tables that break cycles.
//!
//! A definition is registered in the environment *before* its children are
//! resolved. A child that refers back to the definition finds the
//! registered [`Binding`] instead of starting a fresh construction, which
//! is what makes recursive types resolve in finite time.
//!
//! Environments are persistent. Binding returns an extended copy, so
//! sibling branches of a resolution only see the definitions on their own
//! path.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use tessera_schema::{Error, ErrorKind, Result, Schema, SchemaFor, Value};

use crate::encoder::{EncodeValue, Encoder};

/// Stable identity of a definition.
///
/// Record assembly assigns the record's full name unless told otherwise.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Arc<str>);

impl TypeKey {
    /// Creates a key from a name.
    #[must_use]
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Returns the key as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Placeholder for a definition under construction.
///
/// It reports the schema fixed when it was bound and forwards encoding to
/// the completed definition. The definition is held weakly: the tree that
/// owns the definition also owns its recursive occurrences.
pub struct Binding<T: 'static> {
    key: TypeKey,
    schema_for: SchemaFor,
    target: Arc<OnceLock<Weak<dyn EncodeValue<T>>>>,
}

impl<T: 'static> Binding<T> {
    /// Creates an unbound placeholder.
    #[must_use]
    pub fn new(key: TypeKey, schema_for: SchemaFor) -> Arc<Self> {
        Arc::new(Self {
            key,
            schema_for,
            target: Arc::new(OnceLock::new()),
        })
    }

    /// Returns the key this placeholder stands for.
    #[must_use]
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Returns true once the definition has completed.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.target.get().is_some()
    }

    /// Returns this placeholder as an encoder.
    #[must_use]
    pub fn encoder(self: &Arc<Self>) -> Encoder<T> {
        Encoder::Concrete(Arc::clone(self) as Arc<dyn EncodeValue<T>>)
    }

    /// Points the placeholder at the completed definition.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the definition is not concrete or the
    /// placeholder was already completed.
    pub fn complete(&self, definition: &Encoder<T>) -> Result<()> {
        let Encoder::Concrete(encoder) = definition else {
            return Err(Error::new(ErrorKind::Internal(format!(
                "definition {} completed with an unresolved encoder",
                self.key
            ))));
        };
        self.target.set(Arc::downgrade(encoder)).map_err(|_| {
            Error::new(ErrorKind::Internal(format!(
                "definition {} completed twice",
                self.key
            )))
        })
    }

    fn target(&self) -> Result<Arc<dyn EncodeValue<T>>> {
        self.target
            .get()
            .and_then(Weak::upgrade)
            .ok_or_else(|| Error::new(ErrorKind::UnboundDefinition(self.key.to_string())))
    }
}

impl<T: 'static> EncodeValue<T> for Binding<T> {
    fn encode(&self, value: &T) -> Result<Value> {
        self.target()?.encode(value)
    }

    fn schema_for(&self) -> &SchemaFor {
        &self.schema_for
    }

    fn with_schema(&self, schema_for: SchemaFor) -> Result<Encoder<T>> {
        // A reference carries no shape to adapt to; keep pointing at the definition.
        if let Schema::Ref(_) = schema_for.schema() {
            return Ok(Encoder::concrete(Self {
                key: self.key.clone(),
                schema_for: self.schema_for.clone(),
                target: Arc::clone(&self.target),
            }));
        }
        self.target()?.with_schema(schema_for)
    }
}

type Entry = Arc<dyn Any + Send + Sync>;

/// Persistent map from [`TypeKey`] to the placeholder bound for it.
#[derive(Clone, Default)]
pub struct DefinitionEnvironment {
    bindings: im::HashMap<TypeKey, Entry>,
}

impl DefinitionEnvironment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bound definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns true if `key` is bound.
    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.bindings.contains_key(key)
    }

    /// Looks up the placeholder bound for `key`.
    ///
    /// # Errors
    ///
    /// Returns a conflicting definition error if `key` is bound for a
    /// different host type.
    pub fn lookup<T: 'static>(&self, key: &TypeKey) -> Result<Option<Encoder<T>>> {
        let Some(entry) = self.bindings.get(key) else {
            return Ok(None);
        };
        let binding = Arc::clone(entry)
            .downcast::<Binding<T>>()
            .map_err(|_| Error::new(ErrorKind::ConflictingDefinition(key.to_string())))?;
        Ok(Some(binding.encoder()))
    }

    /// Returns an environment extended with `binding`; `self` is untouched.
    #[must_use]
    pub fn bind<T: 'static>(&self, binding: &Arc<Binding<T>>) -> Self {
        let entry: Entry = Arc::clone(binding) as Entry;
        Self {
            bindings: self.bindings.update(binding.key().clone(), entry),
        }
    }

    /// Resolves the definition for `key`, building it at most once per path.
    ///
    /// If `key` is already bound, its placeholder is returned and neither
    /// closure runs. Otherwise `schema_for` fixes the schema the placeholder
    /// reports, the placeholder is bound, `build` constructs the definition
    /// in the extended environment, and the placeholder is completed.
    ///
    /// # Errors
    ///
    /// Returns the first error from either closure. The extended
    /// environment is discarded on error.
    pub fn define<T: 'static>(
        &self,
        key: &TypeKey,
        schema_for: impl FnOnce() -> Result<SchemaFor>,
        build: impl FnOnce(&Self, &SchemaFor) -> Result<Encoder<T>>,
    ) -> Result<Encoder<T>> {
        if let Some(existing) = self.lookup::<T>(key)? {
            tracing::trace!(%key, "reusing bound definition");
            return Ok(existing);
        }

        let schema_for = schema_for()?;
        let binding = Binding::<T>::new(key.clone(), schema_for.clone());
        let extended = self.bind(&binding);
        tracing::trace!(%key, depth = extended.len(), "bound definition");

        let definition = build(&extended, &schema_for)?;
        binding.complete(&definition)?;
        tracing::trace!(%key, "completed definition");
        Ok(definition)
    }
}

impl fmt::Debug for DefinitionEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bindings.keys()).finish()
    }
}
