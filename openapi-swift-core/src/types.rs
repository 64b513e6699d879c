//! Schema classification definitions.
//!
//! This module provides the closed set of abstract data-shape tags assigned
//! to every schema before it is mapped onto a Swift type.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Abstract schema classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Classification {
    /// Integer number.
    Integer,
    /// Floating point or decimal number.
    Number,
    /// Plain string.
    String,
    /// Boolean.
    Boolean,
    /// Date without time.
    Date,
    /// Time without date.
    Time,
    /// Combined date and time.
    DateTime,
    /// Binary payload.
    Binary,
    /// Upload stream placeholder.
    File,
    /// Universal top type.
    Any,
    /// Ordered collection.
    Array,
    /// String- or integer-keyed dictionary.
    Map,
    /// Named object with properties.
    Object,
    /// Named enumeration.
    Enum,
    /// Exclusive choice between member schemas.
    OneOf,
    /// Protocol shared by several objects.
    Interface,
    /// Root of a discriminated hierarchy.
    Hierarchy,
    /// Named wrapper around a primitive value.
    Wrapper,
}

impl Classification {
    /// All classifications, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::Integer,
        Self::Number,
        Self::String,
        Self::Boolean,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::Binary,
        Self::File,
        Self::Any,
        Self::Array,
        Self::Map,
        Self::Object,
        Self::Enum,
        Self::OneOf,
        Self::Interface,
        Self::Hierarchy,
        Self::Wrapper,
    ];

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Binary => "BINARY",
            Self::File => "FILE",
            Self::Any => "ANY",
            Self::Array => "ARRAY",
            Self::Map => "MAP",
            Self::Object => "OBJECT",
            Self::Enum => "ENUM",
            Self::OneOf => "ONE_OF",
            Self::Interface => "INTERFACE",
            Self::Hierarchy => "HIERARCHY",
            Self::Wrapper => "WRAPPER",
        }
    }

    /// Returns true for classifications that map directly to a scalar Swift type.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::Number
                | Self::String
                | Self::Boolean
                | Self::Date
                | Self::Time
                | Self::DateTime
                | Self::Binary
                | Self::File
                | Self::Any
        )
    }

    /// Returns true for classifications that compose other types.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Array | Self::Map)
    }

    /// Returns true for classifications that refer to a named schema.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(
            self,
            Self::Object
                | Self::Enum
                | Self::OneOf
                | Self::Interface
                | Self::Hierarchy
                | Self::Wrapper
        )
    }

    /// Returns true for classifications usable as a dictionary key.
    #[must_use]
    pub const fn is_map_key(&self) -> bool {
        matches!(self, Self::String | Self::Integer)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Classification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();

        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().replace('_', "") == normalized)
            .ok_or_else(|| Error::unknown_classification(s))
    }
}

impl TryFrom<String> for Classification {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Classification> for String {
    fn from(value: Classification) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_names_round_trip() {
        for classification in Classification::ALL {
            let parsed: Classification = classification.name().parse().expect("Failed to parse");
            assert_eq!(parsed, classification);
        }
    }

    #[test]
    fn test_classification_parse_lenient() {
        assert_eq!(
            "date-time".parse::<Classification>().expect("Failed to parse"),
            Classification::DateTime
        );
        assert_eq!(
            "oneOf".parse::<Classification>().expect("Failed to parse"),
            Classification::OneOf
        );
        assert_eq!(
            "integer".parse::<Classification>().expect("Failed to parse"),
            Classification::Integer
        );
    }

    #[test]
    fn test_classification_parse_unknown() {
        let err = "tuple".parse::<Classification>().unwrap_err();
        assert!(err.to_string().contains("tuple"));
    }

    #[test]
    fn test_classification_predicates() {
        assert!(Classification::Integer.is_primitive());
        assert!(!Classification::Array.is_primitive());
        assert!(Classification::Map.is_collection());
        assert!(Classification::OneOf.is_named());
        assert!(Classification::String.is_map_key());
        assert!(!Classification::Number.is_map_key());
    }

    #[test]
    fn test_classification_serde() {
        let json = serde_json::to_string(&Classification::DateTime).expect("Failed to serialize");
        assert_eq!(json, "\"DATETIME\"");
        let parsed: Classification = serde_json::from_str("\"one_of\"").expect("Failed to parse");
        assert_eq!(parsed, Classification::OneOf);
    }
}
