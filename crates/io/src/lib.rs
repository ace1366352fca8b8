//! # geonc-io
//!
//! Materialise a [`geonc_schema::Schema`] into a NetCDF file and bind
//! in-memory node data to the variables it defines.
//!
//! ```text
//! Converter
//!   ├─ MetadataWriter   dimensions → variable definitions → attributes
//!   │                    (metadata.rs)
//!   ├─ DataBinder       type check → shape check → one bulk write
//!   │                    (data.rs, header.rs)
//!   └─ Container        thin seam over the netcdf crate (container.rs)
//! ```
//!
//! # Quick start
//!
//! ```no_run
//! use geonc_io::{Converter, FieldSelector, FileMode, GridNode};
//! use geonc_schema::Schema;
//!
//! let schema = Schema::from_json_str(r#"{
//!     "dimensions": [ { "name": "node", "size": 2 } ],
//!     "variables": [ { "name": "lat", "type": "double", "dims": ["node"] } ]
//! }"#)?;
//!
//! let nodes = vec![
//!     GridNode::new(10.0, 0.0, vec![]),
//!     GridNode::new(20.0, 5.0, vec![]),
//! ];
//!
//! let mut conv = Converter::new(schema, "out.nc", FileMode::Replace)?;
//! let report = conv.write_metadata()?;
//! assert!(report.is_clean());
//! conv.write_node_field("lat", &nodes, FieldSelector::Lat)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod container;
mod convert;
mod data;
mod element;
mod error;
mod header;
mod metadata;
mod node;

pub use container::{Container, FileMode};
pub use convert::Converter;
pub use data::DataBinder;
pub use element::{NcElement, TypedSlice};
pub use error::IoError;
pub use header::HeaderVariables;
pub use metadata::{AttributeIssue, AttributeReport, MetadataWriter, VariableBinding};
pub use node::{FieldSelector, GridNode, Node};
