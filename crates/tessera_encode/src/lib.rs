//! Encoder resolution and assembly for Tessera.
//!
//! This crate provides:
//! - [`Encoder`] - The encoder capability, concrete or resolvable
//! - [`DefinitionEnvironment`] - Cycle-breaking memo table used during resolution
//! - [`SchemaUpdate`] - Schema overrides threaded through resolution
//! - [`RecordEncoder`] / [`EnumEncoder`] - Named record and enum assembly
//! - [`Encodable`] - Default encoders for scalars and containers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod containers;
mod delegate;
pub mod encoder;
pub mod enumeration;
pub mod env;
pub mod primitives;
pub mod record;
pub mod update;

pub use encoder::{EncodeValue, Encoder, ResolveEncoder};
pub use enumeration::{EnumBuilder, EnumEncoder};
pub use env::{Binding, DefinitionEnvironment, TypeKey};
pub use primitives::Encodable;
pub use record::{EncoderField, RecordBuilder, RecordEncoder};
pub use update::SchemaUpdate;
