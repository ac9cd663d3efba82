//! Tiered memory operation engine
//!
//! Runtime-dispatched implementations of the three byte-level primitives:
//! copy, compare (as first-mismatch search), and fill. The widest usable
//! instruction set is selected once from detected CPU features:
//! AVX2 (32-byte chunks) then SSE2 (16-byte chunks) then scalar byte loops.
//! Non-x86_64 builds route every tier to the scalar loops.
//!
//! The safe slice APIs on [`SimdMemOps`] validate lengths and reject
//! overlapping regions; the `pub(crate)` raw-pointer entry points carry no
//! checks and back the status-returning operations in [`crate::raw`].

use crate::cpu::{get_cpu_features, CpuFeatures};
use crate::error::{RawMemError, Result};
use std::sync::OnceLock;

/// Chunk width of the AVX2 tier in bytes
const AVX2_WIDTH: usize = 32;
/// Chunk width of the SSE2 tier in bytes
const SSE2_WIDTH: usize = 16;
/// Copies at least this large prefetch ahead of the load stream
#[cfg(target_arch = "x86_64")]
const PREFETCH_THRESHOLD: usize = 4096;

/// SIMD implementation tiers based on available CPU features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdTier {
    /// AVX2 implementation (32-byte operations)
    Avx2,
    /// SSE2 implementation (16-byte operations)
    Sse2,
    /// Scalar byte-loop implementation
    Scalar,
}

/// Memory operation dispatcher with runtime CPU feature detection
pub struct SimdMemOps {
    tier: SimdTier,
    cpu_features: &'static CpuFeatures,
}

impl SimdMemOps {
    /// Create a dispatcher with the optimal tier for the running CPU
    pub fn new() -> Self {
        let cpu_features = get_cpu_features();
        let tier = Self::select_tier(cpu_features);
        log::debug!("rawmem: selected {:?} tier on {}", tier, cpu_features.vendor);
        Self { tier, cpu_features }
    }

    fn select_tier(features: &CpuFeatures) -> SimdTier {
        if !cfg!(feature = "simd") || !cfg!(target_arch = "x86_64") {
            return SimdTier::Scalar;
        }
        if features.has_avx2 {
            SimdTier::Avx2
        } else if features.has_sse2 {
            SimdTier::Sse2
        } else {
            SimdTier::Scalar
        }
    }

    /// Get the currently selected tier
    pub fn tier(&self) -> SimdTier {
        self.tier
    }

    /// Get the detected CPU features
    pub fn cpu_features(&self) -> &CpuFeatures {
        self.cpu_features
    }
}

//==============================================================================
// PUBLIC SAFE APIS
//==============================================================================

impl SimdMemOps {
    /// Copy `src` into `dst`, which must have the same length and must not
    /// overlap `src`.
    pub fn copy_nonoverlapping(&self, src: &[u8], dst: &mut [u8]) -> Result<()> {
        if src.len() != dst.len() {
            return Err(RawMemError::length_mismatch(src.len(), dst.len()));
        }
        if src.is_empty() {
            return Ok(());
        }

        // Overlap would make the forward chunked copy read bytes it already
        // overwrote.
        let src_start = src.as_ptr() as usize;
        let src_end = src_start + src.len();
        let dst_start = dst.as_mut_ptr() as usize;
        let dst_end = dst_start + dst.len();
        if src_start < dst_end && dst_start < src_end {
            return Err(RawMemError::region_overlap(src.len()));
        }

        unsafe {
            self.memcpy(dst.as_mut_ptr(), src.as_ptr(), src.len());
        }
        Ok(())
    }

    /// Index of the first differing byte over the common prefix of `a` and
    /// `b`, scanning in ascending order with early termination.
    pub fn first_mismatch(&self, a: &[u8], b: &[u8]) -> Option<usize> {
        let len = a.len().min(b.len());
        if len == 0 {
            return None;
        }
        unsafe { self.mismatch(a.as_ptr(), b.as_ptr(), len) }
    }

    /// memcmp-style comparison: `0` if equal, negative if the first
    /// differing byte of `a` is smaller (a prefix-equal shorter slice
    /// compares less), positive otherwise.
    pub fn compare(&self, a: &[u8], b: &[u8]) -> i32 {
        use std::cmp::Ordering;

        match self.first_mismatch(a, b) {
            Some(i) => (a[i] as i32) - (b[i] as i32),
            None => match a.len().cmp(&b.len()) {
                Ordering::Less => -1,
                Ordering::Greater => 1,
                Ordering::Equal => 0,
            },
        }
    }

    /// Set every byte of `slice` to `value`
    pub fn fill(&self, slice: &mut [u8], value: u8) {
        if slice.is_empty() {
            return;
        }
        unsafe {
            self.memset(slice.as_mut_ptr(), value, slice.len());
        }
    }
}

//==============================================================================
// RAW TIER DISPATCH (backs crate::raw)
//==============================================================================

impl SimdMemOps {
    /// Forward copy of `len` bytes. Regions must not overlap.
    ///
    /// # Safety
    /// `src` must be readable and `dst` writable for `len` bytes.
    #[inline]
    pub(crate) unsafe fn memcpy(&self, dst: *mut u8, src: *const u8, len: usize) {
        match (self.tier, len) {
            (SimdTier::Avx2, l) if l >= AVX2_WIDTH => unsafe {
                self.avx2_memcpy(dst, src, len);
            },
            (SimdTier::Sse2, l) if l >= SSE2_WIDTH => unsafe {
                self.sse2_memcpy(dst, src, len);
            },
            _ => unsafe {
                self.scalar_memcpy(dst, src, len);
            },
        }
    }

    /// First differing byte index over `len` bytes, or `None` if equal.
    ///
    /// # Safety
    /// Both pointers must be readable for `len` bytes.
    #[inline]
    pub(crate) unsafe fn mismatch(&self, a: *const u8, b: *const u8, len: usize) -> Option<usize> {
        match (self.tier, len) {
            (SimdTier::Avx2, l) if l >= AVX2_WIDTH => unsafe { self.avx2_mismatch(a, b, len) },
            (SimdTier::Sse2, l) if l >= SSE2_WIDTH => unsafe { self.sse2_mismatch(a, b, len) },
            _ => unsafe { self.scalar_mismatch(a, b, len) },
        }
    }

    /// Write `value` to `len` bytes starting at `dst`.
    ///
    /// # Safety
    /// `dst` must be writable for `len` bytes.
    #[inline]
    pub(crate) unsafe fn memset(&self, dst: *mut u8, value: u8, len: usize) {
        match (self.tier, len) {
            (SimdTier::Avx2, l) if l >= AVX2_WIDTH => unsafe {
                self.avx2_memset(dst, value, len);
            },
            (SimdTier::Sse2, l) if l >= SSE2_WIDTH => unsafe {
                self.sse2_memset(dst, value, len);
            },
            _ => unsafe {
                self.scalar_memset(dst, value, len);
            },
        }
    }
}

//==============================================================================
// AVX2 IMPLEMENTATIONS (32-byte operations)
//==============================================================================

#[cfg(target_arch = "x86_64")]
impl SimdMemOps {
    #[target_feature(enable = "avx2")]
    unsafe fn avx2_memcpy(&self, dst: *mut u8, src: *const u8, len: usize) {
        use std::arch::x86_64::*;

        let mut offset = 0;
        while offset + AVX2_WIDTH <= len {
            unsafe {
                if len >= PREFETCH_THRESHOLD && offset + 256 < len {
                    _mm_prefetch::<_MM_HINT_T0>(src.add(offset + 256) as *const i8);
                }
                let data = _mm256_loadu_si256(src.add(offset) as *const __m256i);
                _mm256_storeu_si256(dst.add(offset) as *mut __m256i, data);
            }
            offset += AVX2_WIDTH;
        }
        if offset < len {
            unsafe {
                self.scalar_memcpy(dst.add(offset), src.add(offset), len - offset);
            }
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn avx2_mismatch(&self, a: *const u8, b: *const u8, len: usize) -> Option<usize> {
        use std::arch::x86_64::*;

        let mut offset = 0;
        while offset + AVX2_WIDTH <= len {
            unsafe {
                let va = _mm256_loadu_si256(a.add(offset) as *const __m256i);
                let vb = _mm256_loadu_si256(b.add(offset) as *const __m256i);
                let eq = _mm256_cmpeq_epi8(va, vb);
                let mask = _mm256_movemask_epi8(eq) as u32;
                if mask != u32::MAX {
                    return Some(offset + (!mask).trailing_zeros() as usize);
                }
            }
            offset += AVX2_WIDTH;
        }
        if offset < len {
            unsafe { self.scalar_mismatch(a.add(offset), b.add(offset), len - offset) }
                .map(|i| offset + i)
        } else {
            None
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn avx2_memset(&self, dst: *mut u8, value: u8, len: usize) {
        use std::arch::x86_64::*;

        let pattern = unsafe { _mm256_set1_epi8(value as i8) };
        let mut offset = 0;
        while offset + AVX2_WIDTH <= len {
            unsafe {
                _mm256_storeu_si256(dst.add(offset) as *mut __m256i, pattern);
            }
            offset += AVX2_WIDTH;
        }
        if offset < len {
            unsafe {
                self.scalar_memset(dst.add(offset), value, len - offset);
            }
        }
    }
}

//==============================================================================
// SSE2 IMPLEMENTATIONS (16-byte operations)
//==============================================================================

#[cfg(target_arch = "x86_64")]
impl SimdMemOps {
    #[target_feature(enable = "sse2")]
    unsafe fn sse2_memcpy(&self, dst: *mut u8, src: *const u8, len: usize) {
        use std::arch::x86_64::*;

        let mut offset = 0;
        while offset + SSE2_WIDTH <= len {
            unsafe {
                let data = _mm_loadu_si128(src.add(offset) as *const __m128i);
                _mm_storeu_si128(dst.add(offset) as *mut __m128i, data);
            }
            offset += SSE2_WIDTH;
        }
        if offset < len {
            unsafe {
                self.scalar_memcpy(dst.add(offset), src.add(offset), len - offset);
            }
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn sse2_mismatch(&self, a: *const u8, b: *const u8, len: usize) -> Option<usize> {
        use std::arch::x86_64::*;

        let mut offset = 0;
        while offset + SSE2_WIDTH <= len {
            unsafe {
                let va = _mm_loadu_si128(a.add(offset) as *const __m128i);
                let vb = _mm_loadu_si128(b.add(offset) as *const __m128i);
                let eq = _mm_cmpeq_epi8(va, vb);
                let mask = _mm_movemask_epi8(eq) as u32;
                if mask != 0xFFFF {
                    return Some(offset + (!mask & 0xFFFF).trailing_zeros() as usize);
                }
            }
            offset += SSE2_WIDTH;
        }
        if offset < len {
            unsafe { self.scalar_mismatch(a.add(offset), b.add(offset), len - offset) }
                .map(|i| offset + i)
        } else {
            None
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn sse2_memset(&self, dst: *mut u8, value: u8, len: usize) {
        use std::arch::x86_64::*;

        let pattern = unsafe { _mm_set1_epi8(value as i8) };
        let mut offset = 0;
        while offset + SSE2_WIDTH <= len {
            unsafe {
                _mm_storeu_si128(dst.add(offset) as *mut __m128i, pattern);
            }
            offset += SSE2_WIDTH;
        }
        if offset < len {
            unsafe {
                self.scalar_memset(dst.add(offset), value, len - offset);
            }
        }
    }
}

#[cfg(not(target_arch = "x86_64"))]
impl SimdMemOps {
    #[inline]
    unsafe fn avx2_memcpy(&self, dst: *mut u8, src: *const u8, len: usize) {
        unsafe { self.scalar_memcpy(dst, src, len) }
    }

    #[inline]
    unsafe fn avx2_mismatch(&self, a: *const u8, b: *const u8, len: usize) -> Option<usize> {
        unsafe { self.scalar_mismatch(a, b, len) }
    }

    #[inline]
    unsafe fn avx2_memset(&self, dst: *mut u8, value: u8, len: usize) {
        unsafe { self.scalar_memset(dst, value, len) }
    }

    #[inline]
    unsafe fn sse2_memcpy(&self, dst: *mut u8, src: *const u8, len: usize) {
        unsafe { self.scalar_memcpy(dst, src, len) }
    }

    #[inline]
    unsafe fn sse2_mismatch(&self, a: *const u8, b: *const u8, len: usize) -> Option<usize> {
        unsafe { self.scalar_mismatch(a, b, len) }
    }

    #[inline]
    unsafe fn sse2_memset(&self, dst: *mut u8, value: u8, len: usize) {
        unsafe { self.scalar_memset(dst, value, len) }
    }
}

//==============================================================================
// SCALAR IMPLEMENTATIONS (ascending byte loops)
//==============================================================================

impl SimdMemOps {
    #[inline]
    unsafe fn scalar_memcpy(&self, dst: *mut u8, src: *const u8, len: usize) {
        for i in 0..len {
            unsafe {
                *dst.add(i) = *src.add(i);
            }
        }
    }

    #[inline]
    unsafe fn scalar_mismatch(&self, a: *const u8, b: *const u8, len: usize) -> Option<usize> {
        for i in 0..len {
            unsafe {
                if *a.add(i) != *b.add(i) {
                    return Some(i);
                }
            }
        }
        None
    }

    #[inline]
    unsafe fn scalar_memset(&self, dst: *mut u8, value: u8, len: usize) {
        for i in 0..len {
            unsafe {
                *dst.add(i) = value;
            }
        }
    }
}

//==============================================================================
// GLOBAL INSTANCE AND CONVENIENCE FUNCTIONS
//==============================================================================

impl Default for SimdMemOps {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_SIMD_OPS: OnceLock<SimdMemOps> = OnceLock::new();

/// Get the shared dispatcher instance (tier selected once per process)
pub fn get_global_simd_ops() -> &'static SimdMemOps {
    GLOBAL_SIMD_OPS.get_or_init(SimdMemOps::new)
}

/// Convenience function for fast memory copy between equal-length slices
pub fn fast_copy(src: &[u8], dst: &mut [u8]) -> Result<()> {
    get_global_simd_ops().copy_nonoverlapping(src, dst)
}

/// Convenience function for memcmp-style comparison
pub fn fast_compare(a: &[u8], b: &[u8]) -> i32 {
    get_global_simd_ops().compare(a, b)
}

/// Convenience function for fast memory fill
pub fn fast_fill(slice: &mut [u8], value: u8) {
    get_global_simd_ops().fill(slice, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_selection() {
        let ops = SimdMemOps::new();
        assert!(matches!(
            ops.tier(),
            SimdTier::Avx2 | SimdTier::Sse2 | SimdTier::Scalar
        ));
    }

    #[test]
    fn test_global_instance_is_shared() {
        let a = get_global_simd_ops();
        let b = get_global_simd_ops();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.tier(), b.tier());
    }

    #[test]
    fn test_copy_across_size_categories() {
        let ops = SimdMemOps::new();
        // Sizes straddling the chunk widths and the prefetch threshold.
        for size in [0, 1, 15, 16, 17, 31, 32, 33, 63, 64, 255, 1024, 4095, 4096, 8192] {
            let src: Vec<u8> = (0..size).map(|i| (i * 17 + 13) as u8).collect();
            let mut dst = vec![0u8; size];
            ops.copy_nonoverlapping(&src, &mut dst)
                .unwrap_or_else(|e| panic!("copy failed for size {}: {}", size, e));
            assert_eq!(src, dst, "mismatch for size {}", size);
        }
    }

    #[test]
    fn test_copy_length_mismatch() {
        let src = [1u8, 2, 3];
        let mut dst = [0u8; 5];
        let err = fast_copy(&src, &mut dst).unwrap_err();
        assert_eq!(err.category(), "length");
    }

    #[test]
    fn test_copy_rejects_overlap() {
        let ops = SimdMemOps::new();
        let mut buf = vec![0u8; 64];
        let ptr = buf.as_mut_ptr();
        // Two views 16 bytes apart over the same allocation.
        let (src, dst) = unsafe {
            (
                std::slice::from_raw_parts(ptr, 48),
                std::slice::from_raw_parts_mut(ptr.add(16), 48),
            )
        };
        let err = ops.copy_nonoverlapping(src, dst).unwrap_err();
        assert_eq!(err.category(), "overlap");
    }

    #[test]
    fn test_first_mismatch_positions() {
        let ops = SimdMemOps::new();
        for size in [1, 16, 17, 32, 33, 100, 4096] {
            let a: Vec<u8> = vec![0xAB; size];
            for k in [0, size / 2, size - 1] {
                let mut b = a.clone();
                b[k] ^= 0xFF;
                assert_eq!(ops.first_mismatch(&a, &b), Some(k), "size {} k {}", size, k);
            }
            assert_eq!(ops.first_mismatch(&a, &a.clone()), None);
        }
    }

    #[test]
    fn test_first_mismatch_common_prefix_only() {
        let ops = SimdMemOps::new();
        let a = [1u8, 2, 3];
        let b = [1u8, 2, 3, 4, 5];
        assert_eq!(ops.first_mismatch(&a, &b), None);
        assert_eq!(ops.first_mismatch(&[], &b), None);
    }

    #[test]
    fn test_compare_ordering() {
        assert_eq!(fast_compare(b"hello", b"hello"), 0);
        assert!(fast_compare(b"hella", b"hello") < 0);
        assert!(fast_compare(b"hellp", b"hello") > 0);
        assert!(fast_compare(b"hell", b"hello") < 0);
        assert!(fast_compare(b"hello", b"hell") > 0);
        assert_eq!(fast_compare(&[], &[]), 0);
    }

    #[test]
    fn test_fill_across_size_categories() {
        for size in [0, 1, 15, 16, 31, 32, 33, 64, 255, 4096] {
            let mut buf = vec![0u8; size];
            fast_fill(&mut buf, 0xAA);
            assert!(buf.iter().all(|&b| b == 0xAA), "size {}", size);
        }
    }

    #[test]
    fn test_fill_zero_value() {
        let mut buf = vec![0xFFu8; 100];
        fast_fill(&mut buf, 0);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_empty_copy_is_ok() {
        let src: &[u8] = &[];
        let mut dst: Vec<u8> = vec![];
        assert!(fast_copy(src, &mut dst).is_ok());
    }
}
