//! Header record and its derived sizes.

use crate::error::HeaderError;

/// Default size in bytes of one stored data value.
pub const DEFAULT_DATA_SIZE: u64 = 8;

/// Element geometry tag stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridType {
    /// Regular (affine) elements.
    Regular,
    /// Deformed elements.
    Deformed,
    /// 2-D elements embedded in 3-D space (spherical shells).
    Embedded2d,
    /// Any other stored value.
    Unknown(u32),
}

impl From<u32> for GridType {
    fn from(v: u32) -> Self {
        match v {
            0 => GridType::Regular,
            1 => GridType::Deformed,
            2 => GridType::Embedded2d,
            other => GridType::Unknown(other),
        }
    }
}

impl From<GridType> for u32 {
    fn from(g: GridType) -> Self {
        match g {
            GridType::Regular => 0,
            GridType::Deformed => 1,
            GridType::Embedded2d => 2,
            GridType::Unknown(v) => v,
        }
    }
}

/// Fields stored explicitly in a header, as produced by a header parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    /// Format version; 0 = constant expansion order, 1 = varying.
    pub version: u32,
    /// Element dimension (2 or 3).
    pub dim: u32,
    /// Number of elements.
    pub n_elems: u64,
    /// Polynomial order per element dimension.
    pub poly_order: Vec<u32>,
    /// Element geometry tag.
    pub grid_type: GridType,
    /// Time cycle stamp.
    pub time_cycle: u64,
    /// Time stamp.
    pub time_stamp: u64,
    /// Whether the file holds multiple fields.
    pub has_mult_vars: bool,
    /// Size of one data value in bytes (4 or 8).
    pub data_size: u64,
}

impl Default for HeaderFields {
    fn default() -> Self {
        Self {
            version: 0,
            dim: 2,
            n_elems: 0,
            poly_order: vec![1, 1],
            grid_type: GridType::Regular,
            time_cycle: 0,
            time_stamp: 0,
            has_mult_vars: false,
            data_size: DEFAULT_DATA_SIZE,
        }
    }
}

/// A validated header with derived sizes.
///
/// Stored field layout: version, dim, grid type and the multi-field flag are
/// 4-byte unsigned; element count, time cycle and time stamp are 8-byte
/// unsigned; followed by one 4-byte order per element dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    fields: HeaderFields,
    n_header_bytes: u64,
    n_data_bytes: u64,
    n_nodes_per_elem: u32,
    n_nodes: u64,
}

const U32_BYTES: u64 = 4;
const U64_BYTES: u64 = 8;

impl HeaderInfo {
    /// Validate header fields and compute derived sizes.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::InvalidDim`], [`HeaderError::PolyOrderLength`],
    /// [`HeaderError::InvalidDataSize`], or [`HeaderError::Overflow`] if a
    /// derived size does not fit.
    pub fn new(fields: HeaderFields) -> Result<Self, HeaderError> {
        if !(2..=3).contains(&fields.dim) {
            return Err(HeaderError::InvalidDim { dim: fields.dim });
        }
        if fields.poly_order.len() != fields.dim as usize {
            return Err(HeaderError::PolyOrderLength {
                expected: fields.dim as usize,
                got: fields.poly_order.len(),
            });
        }
        if !matches!(fields.data_size, 4 | 8) {
            return Err(HeaderError::InvalidDataSize {
                size: fields.data_size,
            });
        }

        let n_nodes_per_elem = fields
            .poly_order
            .iter()
            .try_fold(1u32, |acc, &p| {
                p.checked_add(1).and_then(|n| acc.checked_mul(n))
            })
            .ok_or(HeaderError::Overflow {
                field: "n_nodes_per_elem",
            })?;
        let n_nodes = fields
            .n_elems
            .checked_mul(u64::from(n_nodes_per_elem))
            .ok_or(HeaderError::Overflow { field: "n_nodes" })?;
        let n_data_bytes = n_nodes
            .checked_mul(fields.data_size)
            .ok_or(HeaderError::Overflow {
                field: "n_data_bytes",
            })?;
        let n_header_bytes = 4 * U32_BYTES + 3 * U64_BYTES + u64::from(fields.dim) * U32_BYTES;

        Ok(Self {
            fields,
            n_header_bytes,
            n_data_bytes,
            n_nodes_per_elem,
            n_nodes,
        })
    }

    /// Format version.
    pub fn version(&self) -> u32 {
        self.fields.version
    }

    /// Element dimension.
    pub fn dim(&self) -> u32 {
        self.fields.dim
    }

    /// Number of elements.
    pub fn n_elems(&self) -> u64 {
        self.fields.n_elems
    }

    /// Polynomial order per element dimension.
    pub fn poly_order(&self) -> &[u32] {
        &self.fields.poly_order
    }

    /// Element geometry tag.
    pub fn grid_type(&self) -> GridType {
        self.fields.grid_type
    }

    /// Time cycle stamp.
    pub fn time_cycle(&self) -> u64 {
        self.fields.time_cycle
    }

    /// Time stamp.
    pub fn time_stamp(&self) -> u64 {
        self.fields.time_stamp
    }

    /// Whether the file holds multiple fields.
    pub fn has_mult_vars(&self) -> bool {
        self.fields.has_mult_vars
    }

    /// Size of one data value in bytes.
    pub fn data_size(&self) -> u64 {
        self.fields.data_size
    }

    /// Total byte size of the header.
    pub fn n_header_bytes(&self) -> u64 {
        self.n_header_bytes
    }

    /// Total byte size of the data block.
    pub fn n_data_bytes(&self) -> u64 {
        self.n_data_bytes
    }

    /// Nodes per element, including interior nodes.
    pub fn n_nodes_per_elem(&self) -> u32 {
        self.n_nodes_per_elem
    }

    /// Total nodes in the file.
    pub fn n_nodes(&self) -> u64 {
        self.n_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_2d() -> HeaderFields {
        HeaderFields {
            n_elems: 10,
            poly_order: vec![4, 4],
            ..HeaderFields::default()
        }
    }

    #[test]
    fn derived_sizes_2d() {
        let h = HeaderInfo::new(fields_2d()).unwrap();
        assert_eq!(h.n_nodes_per_elem(), 25);
        assert_eq!(h.n_nodes(), 250);
        assert_eq!(h.n_data_bytes(), 2000);
        assert_eq!(h.n_header_bytes(), 48);
    }

    #[test]
    fn derived_sizes_3d_mixed_orders() {
        let h = HeaderInfo::new(HeaderFields {
            dim: 3,
            n_elems: 2,
            poly_order: vec![1, 2, 3],
            data_size: 4,
            ..HeaderFields::default()
        })
        .unwrap();
        // (1+1) * (2+1) * (3+1)
        assert_eq!(h.n_nodes_per_elem(), 24);
        assert_eq!(h.n_nodes(), 48);
        assert_eq!(h.n_data_bytes(), 192);
        assert_eq!(h.n_header_bytes(), 52);
    }

    #[test]
    fn zero_elements() {
        let h = HeaderInfo::new(HeaderFields::default()).unwrap();
        assert_eq!(h.n_nodes(), 0);
        assert_eq!(h.n_data_bytes(), 0);
    }

    #[test]
    fn rejects_bad_dim() {
        let err = HeaderInfo::new(HeaderFields {
            dim: 1,
            poly_order: vec![2],
            ..HeaderFields::default()
        })
        .unwrap_err();
        assert_eq!(err, HeaderError::InvalidDim { dim: 1 });
    }

    #[test]
    fn rejects_poly_order_length() {
        let err = HeaderInfo::new(HeaderFields {
            dim: 3,
            ..fields_2d()
        })
        .unwrap_err();
        assert_eq!(
            err,
            HeaderError::PolyOrderLength {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn rejects_data_size() {
        let err = HeaderInfo::new(HeaderFields {
            data_size: 2,
            ..fields_2d()
        })
        .unwrap_err();
        assert_eq!(err, HeaderError::InvalidDataSize { size: 2 });
    }

    #[test]
    fn node_count_overflow() {
        let err = HeaderInfo::new(HeaderFields {
            n_elems: u64::MAX,
            ..fields_2d()
        })
        .unwrap_err();
        assert_eq!(err, HeaderError::Overflow { field: "n_nodes" });
    }

    #[test]
    fn grid_type_round_trip() {
        for v in [0u32, 1, 2, 7] {
            assert_eq!(u32::from(GridType::from(v)), v);
        }
        assert_eq!(GridType::from(7), GridType::Unknown(7));
    }
}
