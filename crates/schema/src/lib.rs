//! # geonc-schema
//!
//! The declarative side of a conversion: the JSON schema listing dimensions,
//! variables and their attributes, and the fixed table mapping schema type
//! names onto on-disk element types.
//!
//! ```
//! use geonc_schema::{Schema, TypeTag};
//!
//! let schema = Schema::from_json_str(r#"{
//!     "dimensions": [ { "name": "node", "size": 3 } ],
//!     "variables": [ { "name": "lat", "type": "double", "dims": ["node"] } ]
//! }"#).unwrap();
//!
//! assert_eq!(schema.variable_type("lat").unwrap(), TypeTag::F64);
//! assert_eq!(schema.shape_of("lat").unwrap(), vec![3]);
//! ```

pub mod dtype;
pub mod error;
pub mod schema;

mod validate;

pub use dtype::{AttrValue, TypeTag, resolve};
pub use error::SchemaError;
pub use schema::{AttributeSpec, DimensionSpec, Schema, VariableSpec};
