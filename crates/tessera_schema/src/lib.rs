//! Schema object model, naming policies, and generic values for Tessera.
//!
//! This crate provides:
//! - [`Schema`] - Schema values with validated record, enum, and fixed builders
//! - [`SchemaFor`] - A schema paired with its [`FieldMapper`] naming policy
//! - [`Value`] - The generic representation encoders produce
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod mapper;
pub mod schema;
pub mod schema_for;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use mapper::FieldMapper;
pub use schema::{
    EnumSchema, EnumSchemaBuilder, Field, FixedSchema, Name, Props, RecordSchema,
    RecordSchemaBuilder, Schema, SchemaKind,
};
pub use schema_for::SchemaFor;
pub use value::{EnumSymbol, Record, Value};
