//! Error handling for the rawmem crate
//!
//! Status codes returned by the raw pointer operations live in [`crate::status`];
//! this error type covers the safe slice surface, where precondition failures
//! (mismatched lengths, overlapping slices) are reported as proper errors.

use thiserror::Error;

/// Main error type for the rawmem crate
#[derive(Error, Debug)]
pub enum RawMemError {
    /// A required address argument was null
    #[error("invalid address: null pointer argument")]
    InvalidAddress,

    /// Source and destination slice lengths differ
    #[error("length mismatch: source {src} bytes, destination {dst} bytes")]
    LengthMismatch {
        /// Source length in bytes
        src: usize,
        /// Destination length in bytes
        dst: usize,
    },

    /// Source and destination regions overlap
    #[error("regions overlap over {len} bytes")]
    RegionOverlap {
        /// Length of the requested operation
        len: usize,
    },

    /// Operation not supported on this build or hardware
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// Name of the unsupported operation
        operation: String,
    },
}

impl RawMemError {
    /// Create a length mismatch error
    pub fn length_mismatch(src: usize, dst: usize) -> Self {
        Self::LengthMismatch { src, dst }
    }

    /// Create a region overlap error
    pub fn region_overlap(len: usize) -> Self {
        Self::RegionOverlap { len }
    }

    /// Create a not supported error
    pub fn not_supported<S: Into<String>>(operation: S) -> Self {
        Self::NotSupported {
            operation: operation.into(),
        }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidAddress => "address",
            Self::LengthMismatch { .. } => "length",
            Self::RegionOverlap { .. } => "overlap",
            Self::NotSupported { .. } => "unsupported",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RawMemError>;
