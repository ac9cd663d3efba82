//! Status-returning operations over raw memory regions
//!
//! The pointer-level surface of the crate: three stateless, synchronous
//! operations over caller-owned memory, each taking an explicit byte length
//! and returning a closed status code. Null addresses are reported as
//! [`CompareStatus::InvalidAddress`] (and the copy/fill analogues) before any
//! byte is touched; a zero length succeeds without dereferencing anything.
//!
//! There is no bounds checking beyond the null test, no partial completion
//! (either zero bytes or exactly `len` bytes are touched), and no internal
//! synchronization: callers racing on the same region coordinate themselves.
//! Each call dispatches into the runtime-selected tier of the shared
//! [`SimdMemOps`](crate::simd::SimdMemOps) engine.

use crate::simd::get_global_simd_ops;
use crate::status::{CompareStatus, CopyStatus, FillStatus};

/// Compare two memory regions byte by byte.
///
/// Scans in ascending address order and stops at the first differing byte.
/// A zero `len` compares vacuously equal.
///
/// # Safety
/// Each non-null pointer must be valid for reads of `len` bytes. Null
/// pointers are permitted and reported as [`CompareStatus::InvalidAddress`].
pub unsafe fn compare(a: *const u8, b: *const u8, len: usize) -> CompareStatus {
    if a.is_null() || b.is_null() {
        return CompareStatus::InvalidAddress;
    }
    if len == 0 {
        return CompareStatus::Equal;
    }
    match unsafe { get_global_simd_ops().mismatch(a, b, len) } {
        None => CompareStatus::Equal,
        Some(_) => CompareStatus::NotEqual,
    }
}

/// Copy `len` bytes from `src` to `dst` in ascending address order.
///
/// Writes exactly `len` bytes to `dst` and leaves `src` unmodified. A zero
/// `len` succeeds without touching memory.
///
/// # Safety
/// A non-null `src` must be valid for reads and a non-null `dst` for writes
/// of `len` bytes, and the regions must not overlap — overlap is not
/// detected here and the chunked forward copy will corrupt overlapping data.
/// Null pointers are permitted and reported as [`CopyStatus::InvalidAddress`]
/// with zero bytes written.
pub unsafe fn copy(src: *const u8, dst: *mut u8, len: usize) -> CopyStatus {
    if src.is_null() || dst.is_null() {
        return CopyStatus::InvalidAddress;
    }
    if len == 0 {
        return CopyStatus::Copied;
    }
    unsafe {
        get_global_simd_ops().memcpy(dst, src, len);
    }
    CopyStatus::Copied
}

/// Set `len` bytes starting at `dst` to `value`, in ascending address order.
///
/// Idempotent; a zero `len` succeeds without touching memory.
///
/// # Safety
/// A non-null `dst` must be valid for writes of `len` bytes. A null `dst` is
/// permitted and reported as [`FillStatus::InvalidAddress`] with zero bytes
/// written.
pub unsafe fn fill(dst: *mut u8, len: usize, value: u8) -> FillStatus {
    if dst.is_null() {
        return FillStatus::InvalidAddress;
    }
    if len == 0 {
        return FillStatus::Filled;
    }
    unsafe {
        get_global_simd_ops().memset(dst, value, len);
    }
    FillStatus::Filled
}
