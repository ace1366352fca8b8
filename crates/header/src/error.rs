//! Error types for geonc-header.

/// Error type for header construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    /// Returned when the element dimension is not 2 or 3.
    #[error("element dimension must be 2 or 3, got {dim}")]
    InvalidDim {
        /// The invalid dimension.
        dim: u32,
    },

    /// Returned when the polynomial order list does not have one entry per
    /// element dimension.
    #[error("expected {expected} polynomial orders, got {got}")]
    PolyOrderLength {
        /// Element dimension.
        expected: usize,
        /// Number of orders supplied.
        got: usize,
    },

    /// Returned when the data value size is not 4 or 8 bytes.
    #[error("data size must be 4 or 8 bytes, got {size}")]
    InvalidDataSize {
        /// The invalid size in bytes.
        size: u64,
    },

    /// Returned when a derived size does not fit in 64 bits.
    #[error("{field} overflows")]
    Overflow {
        /// Name of the derived field.
        field: &'static str,
    },
}
