//! Integration tests for Layer 1: Encode
//!
//! Tests for encoder resolution, record and enum assembly, schema overrides,
//! and recursive types.

mod concurrency;
mod enums;
mod properties;
mod records;
mod recursion;
