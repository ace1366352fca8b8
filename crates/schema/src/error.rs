//! Error types for geonc-schema.

use std::path::PathBuf;

/// Error type for all fallible operations in the geonc-schema crate.
///
/// Covers schema loading (file and JSON failures), name resolution against
/// the schema tree, the fixed type table, and attribute value conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Returned when a schema file does not exist on disk.
    #[error("schema file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a schema file exists but cannot be read.
    #[error("failed to read schema {}: {reason}", path.display())]
    Io {
        /// Path of the schema file.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Wraps a JSON syntax or shape error from serde_json.
    #[error("invalid schema json: {reason}")]
    Json {
        /// Description of the underlying JSON failure.
        reason: String,
    },

    /// Returned when a type name is not in the fixed type table.
    #[error("unknown type '{name}'")]
    UnknownType {
        /// The unrecognised type name.
        name: String,
    },

    /// Returned when a variable name is not declared in the schema.
    #[error("variable '{name}' not found in schema")]
    VariableNotFound {
        /// Name of the missing variable.
        name: String,
    },

    /// Returned when a dimension name is not declared in the schema.
    #[error("dimension '{name}' not declared in schema")]
    UnknownDimension {
        /// Name of the missing dimension.
        name: String,
    },

    /// Returned when attribute text does not parse under its declared type.
    #[error("cannot parse '{value}' as {type_name}: {reason}")]
    AttributeValueParse {
        /// The raw textual value.
        value: String,
        /// Canonical name of the declared type.
        type_name: &'static str,
        /// Parser message.
        reason: String,
    },

    /// Returned when one or more schema validation checks fail.
    #[error("{count} schema error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Json {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_type() {
        let err = SchemaError::UnknownType {
            name: "quad".to_string(),
        };
        assert_eq!(err.to_string(), "unknown type 'quad'");
    }

    #[test]
    fn display_variable_not_found() {
        let err = SchemaError::VariableNotFound {
            name: "lat".to_string(),
        };
        assert_eq!(err.to_string(), "variable 'lat' not found in schema");
    }

    #[test]
    fn display_unknown_dimension() {
        let err = SchemaError::UnknownDimension {
            name: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "dimension 'bogus' not declared in schema");
    }

    #[test]
    fn display_attribute_value_parse() {
        let err = SchemaError::AttributeValueParse {
            value: "abc".to_string(),
            type_name: "int",
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot parse 'abc' as int: invalid digit found in string"
        );
    }

    #[test]
    fn display_validation() {
        let err = SchemaError::Validation {
            count: 2,
            details: "unknown type 'quad'; dimension 'x' not declared".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 schema error(s): unknown type 'quad'; dimension 'x' not declared"
        );
    }

    #[test]
    fn from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SchemaError = json_err.into();
        assert!(matches!(err, SchemaError::Json { .. }));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<SchemaError>();
    }
}
