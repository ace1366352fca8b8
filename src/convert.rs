//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use geonc_header::{GridType, HeaderFields, HeaderInfo};
use geonc_io::{FileMode, HeaderVariables};

use crate::config::HeaderToml;

/// Parses a file mode name string into the corresponding enum variant.
pub fn parse_mode(s: &str) -> Result<FileMode> {
    match s.to_lowercase().as_str() {
        "read" => Ok(FileMode::Read),
        "write" => Ok(FileMode::Write),
        "replace" => Ok(FileMode::Replace),
        "new" => Ok(FileMode::NewFile),
        other => bail!("unknown file mode: {other:?}"),
    }
}

/// Builds a validated [`HeaderInfo`] from the TOML header table.
pub fn build_header(h: &HeaderToml) -> Result<HeaderInfo> {
    Ok(HeaderInfo::new(HeaderFields {
        version: h.version,
        dim: h.dim,
        n_elems: h.n_elems,
        poly_order: h.poly_order.clone(),
        grid_type: GridType::from(h.grid_type),
        time_cycle: h.time_cycle,
        time_stamp: h.time_stamp,
        has_mult_vars: h.has_mult_vars,
        data_size: h.data_size,
    })?)
}

/// Builds the header variable names; empty names are skipped.
pub fn build_header_variables(h: &HeaderToml) -> HeaderVariables {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    HeaderVariables::default()
        .with_time_cycle(non_empty(&h.time_cycle_var))
        .with_time_stamp(non_empty(&h.time_stamp_var))
        .with_n_elems(non_empty(&h.n_elems_var))
}
