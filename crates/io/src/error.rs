//! Error types for geonc-io.

use std::path::PathBuf;

use geonc_schema::{SchemaError, TypeTag};

/// Error type for all fallible operations in the geonc-io crate.
///
/// Metadata resolution failures, data-binding contract violations and
/// failures of the underlying NetCDF library all surface here. Schema lookup
/// failures are carried unchanged in [`IoError::Schema`].
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when an existing file is required but absent.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps a schema lookup or conversion failure.
    #[error("schema error: {source}")]
    Schema {
        /// The underlying schema error.
        #[from]
        source: SchemaError,
    },

    /// Returned when a write is attempted on a file opened read-only.
    #[error("{} is open read-only", path.display())]
    ReadOnly {
        /// Path of the container.
        path: PathBuf,
    },

    /// Returned when a variable references a dimension absent from the file.
    #[error("variable '{variable}' references unknown dimension '{name}'")]
    UnknownDimension {
        /// Name of the missing dimension.
        name: String,
        /// Variable referencing it.
        variable: String,
    },

    /// Returned when a dimension already exists with a different length.
    #[error("dimension '{name}' already defined with size {existing}, requested {requested}")]
    DuplicateDimension {
        /// Name of the dimension.
        name: String,
        /// Length already in the file.
        existing: usize,
        /// Length requested by the schema.
        requested: usize,
    },

    /// Returned when a variable already exists with a different element
    /// type or different dimensions.
    #[error("variable '{name}' already defined with a different type or dimensions")]
    DuplicateVariable {
        /// Name of the variable.
        name: String,
    },

    /// Returned when a schema dimension has length zero.
    #[error("dimension '{name}' has length 0")]
    ZeroLengthDimension {
        /// Name of the dimension.
        name: String,
    },

    /// Returned when a variable in the file has an element type with no
    /// [`TypeTag`] equivalent.
    #[error("variable '{name}' has an element type geonc cannot bind")]
    UnsupportedType {
        /// Name of the variable.
        name: String,
    },

    /// Returned when a variable is not present in the file.
    #[error("variable '{name}' not found in {}", path.display())]
    VariableNotFound {
        /// Name of the missing variable.
        name: String,
        /// Path of the container.
        path: PathBuf,
    },

    /// Returned when the number of supplied values differs from the
    /// variable's declared shape.
    #[error("variable '{name}' holds {expected} value(s), got {got}")]
    ShapeMismatch {
        /// Name of the variable.
        name: String,
        /// Product of the variable's dimension lengths.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Returned when the supplied element type differs from the declared one.
    #[error("variable '{name}' is declared {declared}, got {supplied} values")]
    TypeMismatch {
        /// Name of the variable.
        name: String,
        /// Type declared in the schema or stored in the file.
        declared: TypeTag,
        /// Type of the supplied values.
        supplied: TypeTag,
    },

    /// Returned when a node does not carry the requested field.
    #[error("node {node} has {n_fields} field(s), field {index} requested")]
    FieldOutOfRange {
        /// Position of the node in its collection.
        node: usize,
        /// Requested field index.
        index: usize,
        /// Number of fields the node carries.
        n_fields: usize,
    },

    /// Returned when a value does not fit the declared element type.
    #[error("value {value} does not fit variable '{name}' of type {declared}")]
    ValueOutOfRange {
        /// Name of the variable.
        name: String,
        /// The offending value.
        value: String,
        /// Type declared in the schema.
        declared: TypeTag,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}
