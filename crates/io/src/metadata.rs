//! Materialise schema metadata into a container.
//!
//! Order is fixed: every dimension first, then for each variable its
//! definition followed by its attributes. A variable can only be defined
//! once every dimension it references exists in the file.

use std::fmt;

use geonc_schema::{Schema, SchemaError, TypeTag, resolve};
use tracing::{debug, info, warn};

use crate::container::Container;
use crate::error::IoError;

// ---------------------------------------------------------------------------
// VariableBinding
// ---------------------------------------------------------------------------

/// A schema variable bound to its on-disk definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    name: String,
    tag: TypeTag,
    dims: Vec<(String, usize)>,
}

impl VariableBinding {
    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved element type.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Dimension names and lengths in declared order.
    pub fn dims(&self) -> &[(String, usize)] {
        &self.dims
    }

    /// Dimension lengths in declared order.
    pub fn shape(&self) -> Vec<usize> {
        self.dims.iter().map(|(_, len)| *len).collect()
    }

    /// Number of values the variable holds; 1 for a scalar.
    pub fn len(&self) -> usize {
        self.dims.iter().map(|(_, len)| *len).product()
    }

    /// Returns `true` if any dimension has length zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// AttributeReport
// ---------------------------------------------------------------------------

/// One attribute skipped because its value did not convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeIssue {
    /// Variable owning the attribute.
    pub variable: String,
    /// Attribute name.
    pub attribute: String,
    /// The conversion failure.
    pub error: SchemaError,
}

impl fmt::Display for AttributeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.variable, self.attribute, self.error)
    }
}

/// Outcome of writing attributes: how many landed and which were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeReport {
    written: usize,
    issues: Vec<AttributeIssue>,
}

impl AttributeReport {
    /// Number of attributes written.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Attributes skipped, in the order they were encountered.
    pub fn issues(&self) -> &[AttributeIssue] {
        &self.issues
    }

    /// Returns `true` if no attribute was skipped.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: AttributeReport) {
        self.written += other.written;
        self.issues.extend(other.issues);
    }
}

// ---------------------------------------------------------------------------
// MetadataWriter
// ---------------------------------------------------------------------------

/// Writes dimensions, variable definitions and attributes from a schema.
pub struct MetadataWriter<'a> {
    schema: &'a Schema,
    container: &'a mut Container,
}

impl<'a> MetadataWriter<'a> {
    /// Bind a schema to a container for writing.
    pub fn new(schema: &'a Schema, container: &'a mut Container) -> Self {
        Self { schema, container }
    }

    /// Create every schema dimension, in declared order.
    ///
    /// A dimension already present with the same length is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::ZeroLengthDimension`] for a dimension of length 0,
    /// [`IoError::DuplicateDimension`] if the file already defines a
    /// same-named dimension of a different length, or a container error.
    pub fn write_dimensions(&mut self) -> Result<(), IoError> {
        for dim in self.schema.dimensions() {
            if dim.size() == 0 {
                return Err(IoError::ZeroLengthDimension {
                    name: dim.name().to_string(),
                });
            }
            match self.container.dimension_len(dim.name()) {
                Some(existing) if existing == dim.size() => {
                    debug!(dimension = dim.name(), size = existing, "dimension exists");
                }
                Some(existing) => {
                    return Err(IoError::DuplicateDimension {
                        name: dim.name().to_string(),
                        existing,
                        requested: dim.size(),
                    });
                }
                None => self.container.add_dimension(dim.name(), dim.size())?,
            }
        }
        info!(n = self.schema.dimensions().len(), "dimensions written");
        Ok(())
    }

    /// Define one variable over its declared dimensions.
    ///
    /// Dimensions are resolved against the file, so they must have been
    /// written first. Re-defining a variable with the same element type and
    /// identical dimensions returns the existing binding.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Schema`] if the variable or its type is unknown,
    /// [`IoError::UnknownDimension`] if a referenced dimension is missing from
    /// the file (nothing is created), [`IoError::DuplicateVariable`] if the
    /// name is taken by a different definition, or a container error.
    pub fn write_variable_definition(
        &mut self,
        var_name: &str,
    ) -> Result<VariableBinding, IoError> {
        let schema = self.schema;
        let var = schema.variable(var_name)?;
        let tag = resolve(var.type_name())?;

        let dims = var
            .dims()
            .iter()
            .map(|d| {
                self.container
                    .dimension_len(d)
                    .map(|len| (d.clone(), len))
                    .ok_or_else(|| IoError::UnknownDimension {
                        name: d.clone(),
                        variable: var_name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let binding = VariableBinding {
            name: var_name.to_string(),
            tag,
            dims,
        };

        if let Some(existing) = self.container.variable_dimensions(var_name) {
            let stored = self.container.variable_type(var_name)?;
            if stored == tag && existing == binding.dims {
                debug!(variable = var_name, "variable exists");
                return Ok(binding);
            }
            return Err(IoError::DuplicateVariable {
                name: var_name.to_string(),
            });
        }

        let dim_names: Vec<&str> = var.dims().iter().map(String::as_str).collect();
        self.container.add_variable(var_name, tag, &dim_names)?;
        Ok(binding)
    }

    /// Write every declared attribute of a variable.
    ///
    /// Values that do not parse under their declared type are skipped,
    /// logged, and returned in the report; the remaining attributes are
    /// still written.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Schema`] if the variable or an attribute type name
    /// is unknown, or a container error.
    pub fn write_variable_attributes(
        &mut self,
        var_name: &str,
    ) -> Result<AttributeReport, IoError> {
        let schema = self.schema;
        let mut report = AttributeReport::default();
        for attr in schema.attributes_of(var_name)? {
            let tag = resolve(attr.type_name())?;
            match tag.parse_value(attr.value()) {
                Ok(value) => {
                    self.container.put_attribute(var_name, attr.name(), &value)?;
                    report.written += 1;
                }
                Err(error) => {
                    warn!(
                        variable = var_name,
                        attribute = attr.name(),
                        %error,
                        "skipping attribute"
                    );
                    report.issues.push(AttributeIssue {
                        variable: var_name.to_string(),
                        attribute: attr.name().to_string(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Write the whole schema: dimensions, then each variable's definition
    /// and attributes in declared order.
    ///
    /// # Errors
    ///
    /// Stops at the first error from any of the steps.
    pub fn write_all(&mut self) -> Result<AttributeReport, IoError> {
        let schema = self.schema;
        self.write_dimensions()?;
        let mut report = AttributeReport::default();
        for var in schema.variables() {
            self.write_variable_definition(var.name())?;
            report.merge(self.write_variable_attributes(var.name())?);
        }
        info!(
            n_variables = schema.variables().len(),
            n_attributes = report.written(),
            n_skipped = report.issues().len(),
            "metadata written"
        );
        Ok(report)
    }
}
