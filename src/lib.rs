//! Tessera - Schema-described encoders with cycle-safe resolution
//!
//! This crate re-exports all layers of the Tessera system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: tessera_encode - Encoder resolution, record/enum assembly, leaves
//! Layer 0: tessera_schema - Schema model, SchemaFor, generic values, Error
//! ```

pub use tessera_encode as encode;
pub use tessera_schema as schema;
