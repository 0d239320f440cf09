//! Schema override signals threaded through resolution.

use tessera_schema::{Result, SchemaFor};

/// Instruction to keep or wholesale-replace the schema of the encoder being resolved.
///
/// Whether a replacement reaches an encoder's children is the encoder's own
/// decision: records narrow it to each field schema, containers narrow it to
/// their item schema, delegating encoders forward it unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SchemaUpdate {
    /// Pass the encoder through unchanged.
    #[default]
    NoUpdate,
    /// Replace the encoder's schema and propagate the replacement into children.
    FullSchema(SchemaFor),
}

impl SchemaUpdate {
    /// Returns the replacement schema, if any.
    #[must_use]
    pub fn schema_for(&self) -> Option<&SchemaFor> {
        match self {
            Self::NoUpdate => None,
            Self::FullSchema(sf) => Some(sf),
        }
    }

    /// Derives the update for a child from the replacement schema.
    ///
    /// `NoUpdate` stays `NoUpdate`.
    ///
    /// # Errors
    ///
    /// Returns whatever `narrow` returns when it rejects the replacement.
    pub fn narrow(&self, narrow: impl FnOnce(&SchemaFor) -> Result<SchemaFor>) -> Result<Self> {
        match self {
            Self::NoUpdate => Ok(Self::NoUpdate),
            Self::FullSchema(sf) => narrow(sf).map(Self::FullSchema),
        }
    }
}

impl From<SchemaFor> for SchemaUpdate {
    fn from(sf: SchemaFor) -> Self {
        Self::FullSchema(sf)
    }
}
