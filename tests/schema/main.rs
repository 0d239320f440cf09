//! Integration tests for Layer 0: Schema
//!
//! Tests for the schema model, naming policies, generic values, and errors.

mod values;
