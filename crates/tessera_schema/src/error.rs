//! Error types for schema construction, resolution, and encoding.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error is fatal for the single build, resolution, or `encode` call
//! that raised it; none of them are transient.

use std::fmt;

use thiserror::Error;

/// Result type for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Tessera operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto this error's context, creating the context if needed.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Records the top-level type the failing call was made for.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_source(source));
        self
    }

    /// Creates a schema build error.
    #[must_use]
    pub fn schema_build(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchemaBuild(message.into()))
    }

    /// Creates an extraction type error attributed to a record field.
    #[must_use]
    pub fn extraction_type(
        record: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::ExtractionType {
            record: record.into(),
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Creates an unmapped symbol error.
    #[must_use]
    pub fn unmapped_symbol(enum_name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnmappedSymbol {
            enum_name: enum_name.into(),
            symbol: symbol.into(),
        })
    }

    /// Creates a schema override error.
    #[must_use]
    pub fn schema_override(
        expected: impl Into<String>,
        actual: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::SchemaOverride {
            expected: expected.into(),
            actual: actual.into(),
            reason: reason.into(),
        })
    }

    /// Creates a value mismatch error.
    #[must_use]
    pub fn value_mismatch(expected: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValueMismatch {
            expected: expected.into(),
            reason: reason.into(),
        })
    }

    /// Returns true if this is a leaf-level value mismatch.
    #[must_use]
    pub const fn is_value_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::ValueMismatch { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Record, enum, or fixed assembly received structurally invalid input.
    #[error("schema build error: {0}")]
    SchemaBuild(String),

    /// A field's extracted value was rejected by the field's encoder.
    #[error("cannot encode field {field} of {record}: {reason}")]
    ExtractionType {
        /// Full name of the record being encoded.
        record: String,
        /// Name of the offending field.
        field: String,
        /// Why the nested encoder rejected the value.
        reason: String,
    },

    /// An enum's value-to-symbol function produced an undeclared symbol.
    #[error("symbol {symbol} is not declared by enum {enum_name}")]
    UnmappedSymbol {
        /// Full name of the enum schema.
        enum_name: String,
        /// The symbol that was produced.
        symbol: String,
    },

    /// A replacement schema is incompatible with what the encoder emits.
    #[error("cannot apply schema {actual} in place of {expected}: {reason}")]
    SchemaOverride {
        /// Description of the schema the encoder was built for.
        expected: String,
        /// Description of the replacement schema.
        actual: String,
        /// Why the replacement was rejected.
        reason: String,
    },

    /// A leaf encoder was handed a value its schema cannot represent.
    #[error("value does not fit {expected}: {reason}")]
    ValueMismatch {
        /// Description of the schema the value had to fit.
        expected: String,
        /// Why the value did not fit.
        reason: String,
    },

    /// A definition placeholder was used before its definition completed.
    #[error("definition {0} is not bound")]
    UnboundDefinition(String),

    /// Two definitions with different host types share one key.
    #[error("conflicting definitions for {0}")]
    ConflictingDefinition(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Top-level type being encoded or resolved.
    pub source: Option<String>,
    /// Path of record fields, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source type.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    ///
    /// Frames are pushed while an error unwinds, so the innermost field comes first.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "while encoding {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
