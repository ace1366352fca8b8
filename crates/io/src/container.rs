//! Thin seam over the NetCDF library.
//!
//! [`Container`] exclusively owns one open file and exposes only the
//! primitives the metadata writer and data binder need. The file is closed
//! when the container is dropped.

use std::path::{Path, PathBuf};

use geonc_schema::{AttrValue, TypeTag};
use netcdf::types::{FloatType, IntType, NcVariableType};
use tracing::{debug, info};

use crate::element::TypedSlice;
use crate::error::IoError;

/// How a container file is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileMode {
    /// File must exist; opened read-only.
    Read,
    /// File must exist; opened for writing.
    Write,
    /// Create a new file, replacing any existing one.
    #[default]
    Replace,
    /// Create a new file, failing if one already exists.
    NewFile,
}

enum Handle {
    ReadOnly(netcdf::File),
    Writable(netcdf::FileMut),
}

/// An open NetCDF file.
pub struct Container {
    path: PathBuf,
    mode: FileMode,
    handle: Handle,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

fn require_exists(path: &Path) -> Result<(), IoError> {
    if path.exists() {
        Ok(())
    } else {
        Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

impl Container {
    /// Open `path` in the given mode.
    ///
    /// New files are created in NetCDF-4 format, which is required for the
    /// unsigned, 64-bit and string element types.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] when [`FileMode::Read`] or
    /// [`FileMode::Write`] is given a missing path, or [`IoError::Netcdf`]
    /// if the library cannot open or create the file (including an existing
    /// file under [`FileMode::NewFile`]).
    pub fn open(path: impl AsRef<Path>, mode: FileMode) -> Result<Self, IoError> {
        let path = path.as_ref();
        let handle = match mode {
            FileMode::Read => {
                require_exists(path)?;
                Handle::ReadOnly(netcdf::open(path)?)
            }
            FileMode::Write => {
                require_exists(path)?;
                Handle::Writable(netcdf::append(path)?)
            }
            FileMode::Replace => {
                Handle::Writable(netcdf::create_with(path, netcdf::Options::NETCDF4)?)
            }
            FileMode::NewFile => Handle::Writable(netcdf::create_with(
                path,
                netcdf::Options::NETCDF4 | netcdf::Options::NOCLOBBER,
            )?),
        };
        info!(path = %path.display(), ?mode, "container opened");
        Ok(Self {
            path: path.to_path_buf(),
            mode,
            handle,
        })
    }

    /// Path the container was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode the container was opened in.
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    fn file(&self) -> &netcdf::File {
        match &self.handle {
            Handle::ReadOnly(f) => f,
            Handle::Writable(f) => f,
        }
    }

    fn file_mut(&mut self) -> Result<&mut netcdf::FileMut, IoError> {
        match &mut self.handle {
            Handle::ReadOnly(_) => Err(IoError::ReadOnly {
                path: self.path.clone(),
            }),
            Handle::Writable(f) => Ok(f),
        }
    }

    fn missing_variable(&self, name: &str) -> IoError {
        IoError::VariableNotFound {
            name: name.to_string(),
            path: self.path.clone(),
        }
    }

    // -- Dimensions ---------------------------------------------------------

    /// Length of a dimension, or `None` if the file does not define it.
    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.file().dimension(name).map(|d| d.len())
    }

    /// Dimension names and lengths in file order.
    pub fn dimensions(&self) -> Vec<(String, usize)> {
        self.file()
            .dimensions()
            .map(|d| (d.name(), d.len()))
            .collect()
    }

    /// Define a new dimension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::ReadOnly`] or [`IoError::Netcdf`].
    pub fn add_dimension(&mut self, name: &str, size: usize) -> Result<(), IoError> {
        self.file_mut()?.add_dimension(name, size)?;
        debug!(dimension = name, size, "dimension created");
        Ok(())
    }

    // -- Variables ----------------------------------------------------------

    /// Returns `true` if the file defines a variable with this name.
    pub fn has_variable(&self, name: &str) -> bool {
        self.file().variable(name).is_some()
    }

    /// Dimension names and lengths of a variable, in declared order.
    pub fn variable_dimensions(&self, name: &str) -> Option<Vec<(String, usize)>> {
        self.file().variable(name).map(|v| {
            v.dimensions()
                .iter()
                .map(|d| (d.name(), d.len()))
                .collect()
        })
    }

    /// Dimension lengths of a variable, in declared order.
    pub fn variable_shape(&self, name: &str) -> Option<Vec<usize>> {
        self.file()
            .variable(name)
            .map(|v| v.dimensions().iter().map(|d| d.len()).collect())
    }

    /// Element type of a variable as stored in the file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::VariableNotFound`] if the file lacks the variable,
    /// or [`IoError::UnsupportedType`] if its type has no [`TypeTag`].
    pub fn variable_type(&self, name: &str) -> Result<TypeTag, IoError> {
        let var = self
            .file()
            .variable(name)
            .ok_or_else(|| self.missing_variable(name))?;
        stored_tag(&var.vartype()).ok_or_else(|| IoError::UnsupportedType {
            name: name.to_string(),
        })
    }

    /// Define a variable of element type `tag` over `dims`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::ReadOnly`] or [`IoError::Netcdf`].
    pub fn add_variable(&mut self, name: &str, tag: TypeTag, dims: &[&str]) -> Result<(), IoError> {
        let file = self.file_mut()?;
        match tag {
            TypeTag::I8 => {
                file.add_variable::<i8>(name, dims)?;
            }
            TypeTag::U8 => {
                file.add_variable::<u8>(name, dims)?;
            }
            TypeTag::I16 => {
                file.add_variable::<i16>(name, dims)?;
            }
            TypeTag::U16 => {
                file.add_variable::<u16>(name, dims)?;
            }
            TypeTag::I32 => {
                file.add_variable::<i32>(name, dims)?;
            }
            TypeTag::U32 => {
                file.add_variable::<u32>(name, dims)?;
            }
            TypeTag::I64 => {
                file.add_variable::<i64>(name, dims)?;
            }
            TypeTag::U64 => {
                file.add_variable::<u64>(name, dims)?;
            }
            TypeTag::F32 => {
                file.add_variable::<f32>(name, dims)?;
            }
            TypeTag::F64 => {
                file.add_variable::<f64>(name, dims)?;
            }
            TypeTag::Str => {
                file.add_string_variable(name, dims)?;
            }
        }
        debug!(variable = name, %tag, ?dims, "variable created");
        Ok(())
    }

    /// Attach an attribute to a variable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::ReadOnly`], [`IoError::VariableNotFound`] or
    /// [`IoError::Netcdf`].
    pub fn put_attribute(
        &mut self,
        var: &str,
        name: &str,
        value: &AttrValue,
    ) -> Result<(), IoError> {
        let missing = self.missing_variable(var);
        let mut v = self.file_mut()?.variable_mut(var).ok_or(missing)?;
        match value {
            AttrValue::I8(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::U8(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::I16(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::U16(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::I32(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::U32(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::I64(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::U64(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::F32(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::F64(x) => {
                v.put_attribute(name, *x)?;
            }
            AttrValue::Str(s) => {
                v.put_attribute(name, s.as_str())?;
            }
        }
        debug!(variable = var, attribute = name, ?value, "attribute written");
        Ok(())
    }

    /// Write a whole variable from a flat buffer in row-major order.
    ///
    /// The caller guarantees the buffer length equals the variable's shape
    /// product; the library reports anything else as an error.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::ReadOnly`], [`IoError::VariableNotFound`] or
    /// [`IoError::Netcdf`].
    pub fn put_values(&mut self, var: &str, data: TypedSlice<'_>) -> Result<(), IoError> {
        let missing = self.missing_variable(var);
        let shape = self.variable_shape(var).ok_or_else(|| self.missing_variable(var))?;
        let mut v = self.file_mut()?.variable_mut(var).ok_or(missing)?;
        match data {
            TypedSlice::I8(x) => v.put_values(x, ..)?,
            TypedSlice::U8(x) => v.put_values(x, ..)?,
            TypedSlice::I16(x) => v.put_values(x, ..)?,
            TypedSlice::U16(x) => v.put_values(x, ..)?,
            TypedSlice::I32(x) => v.put_values(x, ..)?,
            TypedSlice::U32(x) => v.put_values(x, ..)?,
            TypedSlice::I64(x) => v.put_values(x, ..)?,
            TypedSlice::U64(x) => v.put_values(x, ..)?,
            TypedSlice::F32(x) => v.put_values(x, ..)?,
            TypedSlice::F64(x) => v.put_values(x, ..)?,
            TypedSlice::Str(x) => {
                if shape.is_empty() {
                    if let Some(s) = x.first() {
                        v.put_string(s, ..)?;
                    }
                } else {
                    for (i, s) in x.iter().enumerate() {
                        let index = unflatten(i, &shape);
                        v.put_string(s, index.as_slice())?;
                    }
                }
            }
        }
        debug!(variable = var, n = data.len(), tag = %data.tag(), "data written");
        Ok(())
    }
}

fn stored_tag(vartype: &NcVariableType) -> Option<TypeTag> {
    let tag = match vartype {
        NcVariableType::Int(IntType::I8) => TypeTag::I8,
        NcVariableType::Int(IntType::U8) => TypeTag::U8,
        NcVariableType::Int(IntType::I16) => TypeTag::I16,
        NcVariableType::Int(IntType::U16) => TypeTag::U16,
        NcVariableType::Int(IntType::I32) => TypeTag::I32,
        NcVariableType::Int(IntType::U32) => TypeTag::U32,
        NcVariableType::Int(IntType::I64) => TypeTag::I64,
        NcVariableType::Int(IntType::U64) => TypeTag::U64,
        NcVariableType::Float(FloatType::F32) => TypeTag::F32,
        NcVariableType::Float(FloatType::F64) => TypeTag::F64,
        NcVariableType::String => TypeTag::Str,
        _ => return None,
    };
    Some(tag)
}

/// Row-major multi-index of flat position `i` within `shape`.
fn unflatten(mut i: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (slot, &len) in index.iter_mut().zip(shape).rev() {
        if len > 0 {
            *slot = i % len;
            i /= len;
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unflatten_row_major() {
        let shape = [2, 3];
        let all: Vec<Vec<usize>> = (0..6).map(|i| unflatten(i, &shape)).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2]
            ]
        );
    }

    #[test]
    fn unflatten_one_dim() {
        assert_eq!(unflatten(4, &[5]), vec![4]);
    }

    #[test]
    fn default_mode_is_replace() {
        assert_eq!(FileMode::default(), FileMode::Replace);
    }

    #[test]
    fn read_missing_file() {
        let err = Container::open("/tmp/geonc_missing.nc", FileMode::Read).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn write_missing_file() {
        let err = Container::open("/tmp/geonc_missing.nc", FileMode::Write).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn new_file_refuses_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exists.nc");
        drop(Container::open(&path, FileMode::Replace).unwrap());

        let err = Container::open(&path, FileMode::NewFile).unwrap_err();
        assert!(matches!(err, IoError::Netcdf { .. }), "got {err:?}");
    }

    #[test]
    fn read_only_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.nc");
        drop(Container::open(&path, FileMode::Replace).unwrap());

        let mut c = Container::open(&path, FileMode::Read).unwrap();
        let err = c.add_dimension("x", 2).unwrap_err();
        assert!(matches!(err, IoError::ReadOnly { .. }));
    }

    #[test]
    fn dimension_and_variable_primitives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prim.nc");
        let mut c = Container::open(&path, FileMode::Replace).unwrap();

        c.add_dimension("time", 1).unwrap();
        c.add_dimension("node", 3).unwrap();
        assert_eq!(c.dimension_len("node"), Some(3));
        assert_eq!(c.dimension_len("bogus"), None);

        c.add_variable("u", TypeTag::F32, &["time", "node"]).unwrap();
        assert!(c.has_variable("u"));
        assert_eq!(c.variable_shape("u"), Some(vec![1, 3]));
        assert_eq!(
            c.variable_dimensions("u"),
            Some(vec![("time".to_string(), 1), ("node".to_string(), 3)])
        );
    }

    #[test]
    fn stored_type_of_each_variable() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = Container::open(dir.path().join("t.nc"), FileMode::Replace).unwrap();
        c.add_dimension("node", 2).unwrap();
        for tag in TypeTag::ALL {
            let name = format!("v_{}", tag.name());
            c.add_variable(&name, tag, &["node"]).unwrap();
            assert_eq!(c.variable_type(&name).unwrap(), tag);
        }
        let err = c.variable_type("nope").unwrap_err();
        assert!(matches!(err, IoError::VariableNotFound { .. }));
    }

    #[test]
    fn put_attribute_on_missing_variable() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = Container::open(dir.path().join("a.nc"), FileMode::Replace).unwrap();
        let err = c
            .put_attribute("nope", "units", &AttrValue::Str("m".into()))
            .unwrap_err();
        assert!(matches!(err, IoError::VariableNotFound { .. }));
    }
}
