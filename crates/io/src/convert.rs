//! The converter: one schema and one open container.

use std::path::Path;

use geonc_header::HeaderInfo;
use geonc_schema::Schema;

use crate::container::{Container, FileMode};
use crate::data::DataBinder;
use crate::element::NcElement;
use crate::error::IoError;
use crate::header::HeaderVariables;
use crate::metadata::{AttributeReport, MetadataWriter, VariableBinding};
use crate::node::{FieldSelector, Node};

/// Owns the schema and the container for one conversion.
///
/// Typical call order: [`write_dimensions`](Self::write_dimensions), then for
/// each variable [`write_variable_definition`](Self::write_variable_definition)
/// and [`write_variable_attributes`](Self::write_variable_attributes) (or
/// [`write_metadata`](Self::write_metadata) for all of it), then the data
/// writes.
#[derive(Debug)]
pub struct Converter {
    schema: Schema,
    container: Container,
}

impl Converter {
    /// Open `path` in `mode` and bind it to `schema`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Container::open`].
    pub fn new(schema: Schema, path: impl AsRef<Path>, mode: FileMode) -> Result<Self, IoError> {
        let container = Container::open(path, mode)?;
        Ok(Self::from_parts(schema, container))
    }

    /// Bind an already-open container to `schema`.
    pub fn from_parts(schema: Schema, container: Container) -> Self {
        Self { schema, container }
    }

    /// The schema driving this conversion.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The open container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Drop the schema and hand back the open container.
    pub fn into_container(self) -> Container {
        self.container
    }

    /// Metadata writer over this converter's schema and container.
    pub fn metadata(&mut self) -> MetadataWriter<'_> {
        MetadataWriter::new(&self.schema, &mut self.container)
    }

    /// Data binder over this converter's schema and container.
    pub fn data(&mut self) -> DataBinder<'_> {
        DataBinder::new(&self.schema, &mut self.container)
    }

    // -- Metadata -----------------------------------------------------------

    /// See [`MetadataWriter::write_dimensions`].
    ///
    /// # Errors
    ///
    /// See [`MetadataWriter::write_dimensions`].
    pub fn write_dimensions(&mut self) -> Result<(), IoError> {
        self.metadata().write_dimensions()
    }

    /// See [`MetadataWriter::write_variable_definition`].
    ///
    /// # Errors
    ///
    /// See [`MetadataWriter::write_variable_definition`].
    pub fn write_variable_definition(
        &mut self,
        var_name: &str,
    ) -> Result<VariableBinding, IoError> {
        self.metadata().write_variable_definition(var_name)
    }

    /// See [`MetadataWriter::write_variable_attributes`].
    ///
    /// # Errors
    ///
    /// See [`MetadataWriter::write_variable_attributes`].
    pub fn write_variable_attributes(
        &mut self,
        var_name: &str,
    ) -> Result<AttributeReport, IoError> {
        self.metadata().write_variable_attributes(var_name)
    }

    /// See [`MetadataWriter::write_all`].
    ///
    /// # Errors
    ///
    /// See [`MetadataWriter::write_all`].
    pub fn write_metadata(&mut self) -> Result<AttributeReport, IoError> {
        self.metadata().write_all()
    }

    // -- Data ---------------------------------------------------------------

    /// See [`DataBinder::write_node_field`].
    ///
    /// # Errors
    ///
    /// See [`DataBinder::write_node_field`].
    pub fn write_node_field<N: Node>(
        &mut self,
        var_name: &str,
        nodes: &[N],
        selector: FieldSelector,
    ) -> Result<(), IoError> {
        self.data().write_node_field(var_name, nodes, selector)
    }

    /// See [`DataBinder::write_scalar`].
    ///
    /// # Errors
    ///
    /// See [`DataBinder::write_scalar`].
    pub fn write_scalar<T: NcElement>(&mut self, var_name: &str, value: T) -> Result<(), IoError> {
        self.data().write_scalar(var_name, value)
    }

    /// See [`DataBinder::write_values`].
    ///
    /// # Errors
    ///
    /// See [`DataBinder::write_values`].
    pub fn write_values<T: NcElement>(
        &mut self,
        var_name: &str,
        values: &[T],
    ) -> Result<(), IoError> {
        self.data().write_values(var_name, values)
    }

    /// See [`DataBinder::write_strings`].
    ///
    /// # Errors
    ///
    /// See [`DataBinder::write_strings`].
    pub fn write_strings<S: AsRef<str>>(
        &mut self,
        var_name: &str,
        values: &[S],
    ) -> Result<(), IoError> {
        self.data().write_strings(var_name, values)
    }

    /// See [`DataBinder::write_header`].
    ///
    /// # Errors
    ///
    /// See [`DataBinder::write_header`].
    pub fn write_header(
        &mut self,
        header: &HeaderInfo,
        vars: &HeaderVariables,
    ) -> Result<(), IoError> {
        self.data().write_header(header, vars)
    }
}
