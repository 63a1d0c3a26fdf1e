use thiserror::Error;

// Unified error type for mtxvec.
//
// Only recoverable conditions are reported through this enum: input validation
// at construction boundaries and zero divisors in the singular operations.
// Out-of-bounds access and dimension mismatches inside arithmetic ops are
// programming errors and fail fast via assertions instead of silently
// producing wrong numbers. Sparse pattern violations are an expected,
// checkable condition and are reported by `CsrMatrix::set` as a plain `bool`.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtxError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("entry ({row}, {col}) out of range for a {nrows}x{ncols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    #[error("division by zero in {0}")]
    SingularOperation(&'static str),
}
