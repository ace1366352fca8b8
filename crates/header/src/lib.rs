//! # geonc-header
//!
//! The header record carried by binary simulation output files. Parsing the
//! binary layout is the job of the reader that produces [`HeaderFields`];
//! this crate validates the stored fields and derives node counts and byte
//! sizes from them.
//!
//! ```
//! use geonc_header::{HeaderFields, HeaderInfo};
//!
//! let header = HeaderInfo::new(HeaderFields {
//!     n_elems: 8,
//!     poly_order: vec![3, 3],
//!     ..HeaderFields::default()
//! }).unwrap();
//!
//! assert_eq!(header.n_nodes_per_elem(), 16);
//! assert_eq!(header.n_nodes(), 128);
//! ```

pub mod error;
pub mod info;

pub use error::HeaderError;
pub use info::{DEFAULT_DATA_SIZE, GridType, HeaderFields, HeaderInfo};
