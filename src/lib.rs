//! # rawmem: Raw Byte-Level Memory Operations
//!
//! This crate provides three primitive operations over raw memory regions —
//! compare, copy, and fill — with null-pointer guards, closed status-code
//! enums, and architecture-specific implementations selected at runtime.
//!
//! ## Key Features
//!
//! - **Status codes, not panics**: every outcome is returned as a value from
//!   a closed enum; a null address yields `InvalidAddress` instead of a fault
//! - **Two API levels**: an unchecked pointer surface in [`raw`] carrying the
//!   original contract, and safe slice APIs on [`SimdMemOps`] that reject
//!   mismatched lengths and overlapping regions
//! - **Multi-tier SIMD**: AVX2 → SSE2 → scalar byte loops, chosen once per
//!   process from detected CPU features
//! - **Stateless**: no allocation, no retained references, no synchronization;
//!   callers own their memory and any cross-thread coordination
//!
//! ## Quick Start
//!
//! ```rust
//! use rawmem::{fast_compare, fast_copy, fast_fill, CompareStatus, raw};
//!
//! // Safe slice surface
//! let src = [7u8, 8, 9];
//! let mut dst = [0u8; 3];
//! fast_copy(&src, &mut dst).unwrap();
//! assert_eq!(dst, src);
//! assert_eq!(fast_compare(&src, &dst), 0);
//!
//! let mut buf = [0u8; 4];
//! fast_fill(&mut buf, 0xAA);
//! assert_eq!(buf, [0xAA; 4]);
//!
//! // Pointer surface with status codes
//! let status = unsafe { raw::compare(src.as_ptr(), dst.as_ptr(), 3) };
//! assert_eq!(status, CompareStatus::Equal);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod cpu;
pub mod error;
pub mod raw;
pub mod simd;
pub mod status;

// Re-export core types
pub use cpu::{get_cpu_features, CpuFeatures};
pub use error::{RawMemError, Result};
pub use simd::{fast_compare, fast_copy, fast_fill, get_global_simd_ops, SimdMemOps, SimdTier};
pub use status::{CompareStatus, CopyStatus, FillStatus, MEMORY_START};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check whether a vector tier (rather than the scalar loops) is active
pub fn has_simd_support() -> bool {
    get_global_simd_ops().tier() != SimdTier::Scalar
}

/// Initialize the library (logs the selected tier; safe to call repeatedly)
pub fn init() {
    let ops = get_global_simd_ops();
    log::debug!(
        "initializing rawmem v{} with {:?} tier on {}",
        VERSION,
        ops.tier(),
        ops.cpu_features().model
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_multiple_init_calls() {
        init();
        init();
        init();
    }

    #[test]
    fn test_simd_support_matches_tier() {
        let tier = get_global_simd_ops().tier();
        assert_eq!(has_simd_support(), tier != SimdTier::Scalar);
    }

    #[test]
    fn test_re_exports() {
        let _status: CompareStatus = CompareStatus::Equal;
        let _start: u32 = MEMORY_START;
        let _err = RawMemError::InvalidAddress;
        let _features = get_cpu_features();
        assert!(std::any::type_name::<Result<()>>().contains("RawMemError"));
    }
}
