//! Property-based testing for the memory operations
//!
//! Uses proptest to validate the contract properties over arbitrary buffer
//! contents, lengths, and perturbation offsets, and checks that the safe
//! slice surface and the raw pointer surface agree with each other and with
//! the standard library equivalents.

use proptest::prelude::*;
use rawmem::{fast_compare, fast_copy, fast_fill, raw, CompareStatus, CopyStatus, FillStatus};

/// Buffers long enough to cross both vector chunk widths
fn buffer_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

proptest! {
    #[test]
    fn compare_is_reflexive(data in buffer_strategy()) {
        let status = unsafe { raw::compare(data.as_ptr(), data.as_ptr(), data.len()) };
        prop_assert_eq!(status, CompareStatus::Equal);
    }

    #[test]
    fn compare_agrees_with_slice_equality(a in buffer_strategy(), b in buffer_strategy()) {
        let len = a.len().min(b.len());
        let status = unsafe { raw::compare(a.as_ptr(), b.as_ptr(), len) };
        let expected = if a[..len] == b[..len] {
            CompareStatus::Equal
        } else {
            CompareStatus::NotEqual
        };
        prop_assert_eq!(status, expected);
    }

    #[test]
    fn compare_detects_perturbation(data in prop::collection::vec(any::<u8>(), 1..512),
                                    k in any::<prop::sample::Index>(),
                                    delta in 1u8..=255) {
        let k = k.index(data.len());
        let mut other = data.clone();
        other[k] = other[k].wrapping_add(delta);
        let status = unsafe { raw::compare(data.as_ptr(), other.as_ptr(), data.len()) };
        prop_assert_eq!(status, CompareStatus::NotEqual);
    }

    #[test]
    fn copy_round_trips(src in buffer_strategy()) {
        let mut dst = vec![0u8; src.len()];
        let status = unsafe { raw::copy(src.as_ptr(), dst.as_mut_ptr(), src.len()) };
        prop_assert_eq!(status, CopyStatus::Copied);
        prop_assert_eq!(&dst, &src);
        // And the regions now compare equal through the same surface.
        let cmp = unsafe { raw::compare(src.as_ptr(), dst.as_ptr(), src.len()) };
        prop_assert_eq!(cmp, CompareStatus::Equal);
    }

    #[test]
    fn copy_preserves_source(src in buffer_strategy()) {
        let snapshot = src.clone();
        let mut dst = vec![0u8; src.len()];
        unsafe { raw::copy(src.as_ptr(), dst.as_mut_ptr(), src.len()) };
        prop_assert_eq!(src, snapshot);
    }

    #[test]
    fn fill_saturates_and_is_idempotent(len in 0usize..512, value in any::<u8>()) {
        let mut first = vec![0u8; len];
        let mut second = vec![0u8; len];
        unsafe {
            prop_assert_eq!(raw::fill(first.as_mut_ptr(), len, value), FillStatus::Filled);
            prop_assert_eq!(raw::fill(second.as_mut_ptr(), len, value), FillStatus::Filled);
            prop_assert_eq!(raw::fill(second.as_mut_ptr(), len, value), FillStatus::Filled);
        }
        prop_assert!(first.iter().all(|&b| b == value));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn safe_copy_agrees_with_std(src in buffer_strategy()) {
        let mut via_crate = vec![0u8; src.len()];
        let mut via_std = vec![0u8; src.len()];
        fast_copy(&src, &mut via_crate).unwrap();
        via_std.copy_from_slice(&src);
        prop_assert_eq!(via_crate, via_std);
    }

    #[test]
    fn safe_compare_agrees_with_ord(a in buffer_strategy(), b in buffer_strategy()) {
        use std::cmp::Ordering;
        let expected = a.cmp(&b);
        let got = fast_compare(&a, &b);
        match expected {
            Ordering::Less => prop_assert!(got < 0),
            Ordering::Equal => prop_assert_eq!(got, 0),
            Ordering::Greater => prop_assert!(got > 0),
        }
    }

    #[test]
    fn safe_fill_agrees_with_std(len in 0usize..512, value in any::<u8>()) {
        let mut via_crate = vec![0u8; len];
        let mut via_std = vec![0u8; len];
        fast_fill(&mut via_crate, value);
        via_std.fill(value);
        prop_assert_eq!(via_crate, via_std);
    }
}
