//! Bind in-memory values to container variables.
//!
//! Every write resolves the variable by name, checks the supplied element
//! type against the schema and the supplied length against the variable's
//! shape in the file, and only then hands one buffer to the container.

use geonc_schema::{Schema, TypeTag};
use tracing::debug;

use crate::container::Container;
use crate::element::{NcElement, TypedSlice};
use crate::error::IoError;
use crate::node::{FieldSelector, Node};

/// Writes variable data into a container whose metadata is already defined.
pub struct DataBinder<'a> {
    schema: &'a Schema,
    container: &'a mut Container,
}

impl<'a> DataBinder<'a> {
    /// Bind a schema to a container for data writes.
    pub fn new(schema: &'a Schema, container: &'a mut Container) -> Self {
        Self { schema, container }
    }

    /// Write one selected value per node, in collection order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FieldOutOfRange`] if a node lacks the selected
    /// field, plus every error of [`write_values`](Self::write_values).
    pub fn write_node_field<N: Node>(
        &mut self,
        var_name: &str,
        nodes: &[N],
        selector: FieldSelector,
    ) -> Result<(), IoError> {
        let values = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| match selector {
                FieldSelector::Index(k) => node.field(k).ok_or(IoError::FieldOutOfRange {
                    node: i,
                    index: k,
                    n_fields: node.n_fields(),
                }),
                FieldSelector::Lat => Ok(node.lat()),
                FieldSelector::Lon => Ok(node.lon()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(variable = var_name, ?selector, n = values.len(), "node field gathered");
        self.write_values(var_name, &values)
    }

    /// Write a single value to a scalar or singleton variable.
    ///
    /// # Errors
    ///
    /// See [`write_values`](Self::write_values).
    pub fn write_scalar<T: NcElement>(&mut self, var_name: &str, value: T) -> Result<(), IoError> {
        self.write_values(var_name, &[value])
    }

    /// Write a whole variable from values in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::TypeMismatch`] if `T` is not the element type
    /// declared in the schema and stored in the file,
    /// [`IoError::ShapeMismatch`] if `values.len()` differs from the
    /// variable's shape, [`IoError::Schema`] or [`IoError::VariableNotFound`]
    /// if the variable is unknown, or a container error.
    pub fn write_values<T: NcElement>(
        &mut self,
        var_name: &str,
        values: &[T],
    ) -> Result<(), IoError> {
        self.write_typed(var_name, T::typed(values))
    }

    /// Write a `string` variable.
    ///
    /// # Errors
    ///
    /// Same as [`write_values`](Self::write_values).
    pub fn write_strings<S: AsRef<str>>(
        &mut self,
        var_name: &str,
        values: &[S],
    ) -> Result<(), IoError> {
        let refs: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
        self.write_typed(var_name, TypedSlice::Str(&refs))
    }

    /// Write a tagged buffer after checking type and shape.
    ///
    /// # Errors
    ///
    /// Same as [`write_values`](Self::write_values).
    pub fn write_typed(&mut self, var_name: &str, data: TypedSlice<'_>) -> Result<(), IoError> {
        let declared = self.schema.variable_type(var_name)?;
        if declared != data.tag() {
            return Err(IoError::TypeMismatch {
                name: var_name.to_string(),
                declared,
                supplied: data.tag(),
            });
        }

        let stored = self.container.variable_type(var_name)?;
        if stored != data.tag() {
            return Err(IoError::TypeMismatch {
                name: var_name.to_string(),
                declared: stored,
                supplied: data.tag(),
            });
        }

        let shape = self
            .container
            .variable_shape(var_name)
            .ok_or_else(|| IoError::VariableNotFound {
                name: var_name.to_string(),
                path: self.container.path().to_path_buf(),
            })?;
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(IoError::ShapeMismatch {
                name: var_name.to_string(),
                expected,
                got: data.len(),
            });
        }

        self.container.put_values(var_name, data)
    }

    /// Write an unsigned integer into a variable of any declared integer
    /// type, converting with a range check.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::TypeMismatch`] if the variable is not an integer
    /// type, [`IoError::ValueOutOfRange`] if `value` does not fit, plus the
    /// errors of [`write_values`](Self::write_values).
    pub fn write_scalar_u64(&mut self, var_name: &str, value: u64) -> Result<(), IoError> {
        let declared = self.schema.variable_type(var_name)?;
        let out_of_range = || IoError::ValueOutOfRange {
            name: var_name.to_string(),
            value: value.to_string(),
            declared,
        };
        match declared {
            TypeTag::I8 => {
                self.write_scalar(var_name, i8::try_from(value).map_err(|_| out_of_range())?)
            }
            TypeTag::U8 => {
                self.write_scalar(var_name, u8::try_from(value).map_err(|_| out_of_range())?)
            }
            TypeTag::I16 => {
                self.write_scalar(var_name, i16::try_from(value).map_err(|_| out_of_range())?)
            }
            TypeTag::U16 => {
                self.write_scalar(var_name, u16::try_from(value).map_err(|_| out_of_range())?)
            }
            TypeTag::I32 => {
                self.write_scalar(var_name, i32::try_from(value).map_err(|_| out_of_range())?)
            }
            TypeTag::U32 => {
                self.write_scalar(var_name, u32::try_from(value).map_err(|_| out_of_range())?)
            }
            TypeTag::I64 => {
                self.write_scalar(var_name, i64::try_from(value).map_err(|_| out_of_range())?)
            }
            TypeTag::U64 => self.write_scalar(var_name, value),
            TypeTag::F32 | TypeTag::F64 | TypeTag::Str => Err(IoError::TypeMismatch {
                name: var_name.to_string(),
                declared,
                supplied: TypeTag::U64,
            }),
        }
    }
}
