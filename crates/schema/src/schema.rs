//! Read-only view over the parsed metadata schema.
//!
//! The schema is a JSON document with two ordered arrays:
//!
//! ```json
//! {
//!   "dimensions": [ { "name": "node", "size": 3 } ],
//!   "variables": [
//!     {
//!       "name": "lat",
//!       "type": "double",
//!       "dims": ["node"],
//!       "attributes": [ { "name": "units", "type": "string", "value": "degrees_north" } ]
//!     }
//!   ]
//! }
//! ```
//!
//! Dimension sizes may be JSON numbers or numeric strings. Attribute values
//! are kept as raw text whatever their JSON type and are only converted when
//! the attribute is written.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::dtype::{TypeTag, resolve};
use crate::error::SchemaError;
use crate::validate::ValidationCollector;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A named, sized axis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DimensionSpec {
    name: String,
    #[serde(deserialize_with = "size_from_json")]
    size: usize,
}

impl DimensionSpec {
    /// Create a dimension entry.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Dimension name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimension length.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// A named, typed attribute with its raw textual value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeSpec {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(deserialize_with = "raw_text")]
    value: String,
}

impl AttributeSpec {
    /// Create an attribute entry.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type name, unresolved.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Raw textual value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A variable definition: type, ordered dimensions and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableSpec {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    dims: Vec<String>,
    #[serde(default)]
    attributes: Vec<AttributeSpec>,
}

impl VariableSpec {
    /// Create a variable entry with no attributes.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        type_name: impl Into<String>,
        dims: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            dims: dims.into_iter().map(Into::into).collect(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, attr: AttributeSpec) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type name, unresolved.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Dimension names in declared order.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Attributes in declared order.
    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// The metadata tree driving a conversion.
///
/// Loaded once and never mutated; every accessor is a read-only lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Schema {
    #[serde(default)]
    dimensions: Vec<DimensionSpec>,
    #[serde(default)]
    variables: Vec<VariableSpec>,
}

impl Schema {
    /// Build a schema from already-constructed entries.
    pub fn new(dimensions: Vec<DimensionSpec>, variables: Vec<VariableSpec>) -> Self {
        Self {
            dimensions,
            variables,
        }
    }

    /// Parse a schema from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] on malformed JSON or a document that does
    /// not have the schema shape.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.log_loaded();
        Ok(schema)
    }

    /// Parse a schema from any reader producing JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] on malformed input.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_reader(reader)?;
        schema.log_loaded();
        Ok(schema)
    }

    /// Load a schema from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::FileNotFound`] if `path` does not exist,
    /// [`SchemaError::Io`] if it cannot be read, or [`SchemaError::Json`] if
    /// its contents are not a valid schema.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        if !path.exists() {
            return Err(SchemaError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    fn log_loaded(&self) {
        debug!(
            n_dimensions = self.dimensions.len(),
            n_variables = self.variables.len(),
            "schema loaded"
        );
    }

    /// Declared dimensions in file order.
    pub fn dimensions(&self) -> &[DimensionSpec] {
        &self.dimensions
    }

    /// Look up a dimension by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownDimension`] if no dimension has that name.
    pub fn dimension(&self, name: &str) -> Result<&DimensionSpec, SchemaError> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| SchemaError::UnknownDimension {
                name: name.to_string(),
            })
    }

    /// Declared variables in file order.
    pub fn variables(&self) -> &[VariableSpec] {
        &self.variables
    }

    /// Look up a variable by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::VariableNotFound`] if no variable has that name.
    pub fn variable(&self, name: &str) -> Result<&VariableSpec, SchemaError> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| SchemaError::VariableNotFound {
                name: name.to_string(),
            })
    }

    /// Attributes of a variable, raw values untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::VariableNotFound`] if the variable is absent.
    pub fn attributes_of(&self, var_name: &str) -> Result<&[AttributeSpec], SchemaError> {
        Ok(self.variable(var_name)?.attributes())
    }

    /// Resolved element type of a variable.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::VariableNotFound`] or
    /// [`SchemaError::UnknownType`].
    pub fn variable_type(&self, var_name: &str) -> Result<TypeTag, SchemaError> {
        resolve(self.variable(var_name)?.type_name())
    }

    /// Sizes of a variable's dimensions, in declared order.
    ///
    /// An empty result denotes a scalar variable holding one value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::VariableNotFound`] or
    /// [`SchemaError::UnknownDimension`].
    pub fn shape_of(&self, var_name: &str) -> Result<Vec<usize>, SchemaError> {
        self.variable(var_name)?
            .dims()
            .iter()
            .map(|d| self.dimension(d).map(DimensionSpec::size))
            .collect()
    }

    /// Check the whole schema for consistency.
    ///
    /// Reports every problem found rather than stopping at the first:
    /// zero-length dimensions, duplicate dimension or variable names,
    /// duplicate attribute names on a variable, unknown type names and
    /// undeclared dimension references.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Validation`] summarising all problems.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut c = ValidationCollector::new();

        let mut seen = HashSet::new();
        for d in &self.dimensions {
            if !seen.insert(d.name.as_str()) {
                c.push(format!("duplicate dimension '{}'", d.name));
            }
            if d.size == 0 {
                c.push(format!("dimension '{}' has size 0", d.name));
            }
        }

        let mut seen = HashSet::new();
        for v in &self.variables {
            if !seen.insert(v.name.as_str()) {
                c.push(format!("duplicate variable '{}'", v.name));
            }
            if let Err(e) = resolve(&v.type_name) {
                c.push(format!("variable '{}': {e}", v.name));
            }
            for d in &v.dims {
                if let Err(e) = self.dimension(d) {
                    c.push(format!("variable '{}': {e}", v.name));
                }
            }
            let mut attr_names = HashSet::new();
            for a in &v.attributes {
                if !attr_names.insert(a.name.as_str()) {
                    c.push(format!(
                        "variable '{}': duplicate attribute '{}'",
                        v.name, a.name
                    ));
                }
                if let Err(e) = resolve(&a.type_name) {
                    c.push(format!("variable '{}' attribute '{}': {e}", v.name, a.name));
                }
            }
        }

        c.finish()
    }
}

// ---------------------------------------------------------------------------
// Deserialisation helpers
// ---------------------------------------------------------------------------

fn size_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| {
                de::Error::custom(format!(
                    "dimension size must be a non-negative integer, got {n}"
                ))
            }),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid dimension size '{s}': {e}"))),
        other => Err(de::Error::custom(format!(
            "invalid dimension size: {other}"
        ))),
    }
}

fn raw_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "attribute value must be a string, number or boolean, got {other}"
        ))),
    }
}
