//! Field naming policies.
//!
//! A [`FieldMapper`] turns a declared field name into the name written to
//! the schema. Record assembly applies it to each field declared by name.

use std::borrow::Cow;

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Policy for mapping declared field names to schema field names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldMapper {
    /// Keep declared names unchanged.
    #[default]
    Default,
    /// `first_name`
    SnakeCase,
    /// `FirstName`
    PascalCase,
    /// `firstName`
    CamelCase,
}

impl FieldMapper {
    /// Maps a declared field name to its schema name.
    #[must_use]
    pub fn to_schema_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Default => Cow::Borrowed(name),
            Self::SnakeCase => Cow::Owned(name.to_snake_case()),
            Self::PascalCase => Cow::Owned(name.to_upper_camel_case()),
            Self::CamelCase => Cow::Owned(name.to_lower_camel_case()),
        }
    }
}
