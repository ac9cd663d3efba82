//! Status codes for the raw memory operations
//!
//! Each operation returns a closed enum rather than a `Result`: callers branch
//! on the returned status immediately after the call, and nothing here is ever
//! raised through panics or unwinding. The taxonomy keeps two kinds of
//! reserved variants alive for exhaustive matching even though the shipped
//! algorithms never produce them: the per-operation "not completed" variants
//! (`NotCopied`, `NotFilled`) and the `Unsupported` hard-error variants.

use crate::error::RawMemError;

/// Canonical "beginning of memory" offset for callers building address
/// arithmetic on top of the raw operations. Not consumed by the operations
/// themselves.
pub const MEMORY_START: u32 = 0;

/// Outcome of a byte-wise memory comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareStatus {
    /// Both regions hold identical bytes over the compared length
    Equal,
    /// At least one byte differs
    NotEqual,
    /// Reserved: comparison not supported. Never produced by the shipped
    /// algorithm; kept so exhaustive matches stay stable.
    Unsupported,
    /// An address argument was null; no memory was touched
    InvalidAddress,
}

/// Outcome of a memory copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyStatus {
    /// Exactly the requested number of bytes was copied
    Copied,
    /// Reserved: copy did not complete. Never produced by the shipped
    /// algorithm, which either rejects the addresses up front or copies the
    /// full length.
    NotCopied,
    /// Reserved: copy not supported. Never produced by the shipped algorithm.
    Unsupported,
    /// An address argument was null; no bytes were written
    InvalidAddress,
}

/// Outcome of a memory fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillStatus {
    /// Exactly the requested number of bytes was written
    Filled,
    /// Reserved: fill did not complete. Never produced by the shipped
    /// algorithm.
    NotFilled,
    /// Reserved: fill not supported. Never produced by the shipped algorithm.
    Unsupported,
    /// The target address was null; no bytes were written
    InvalidAddress,
}

impl CompareStatus {
    /// True for any non-error outcome, including `NotEqual`
    pub fn is_success(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    /// True for `Unsupported` and `InvalidAddress`
    pub fn is_error(self) -> bool {
        !self.is_success()
    }

    /// Bridge into the crate error type. `Equal` and `NotEqual` both map to
    /// `Ok` since an unequal comparison is a successful comparison.
    pub fn ok(self) -> crate::Result<Self> {
        match self {
            Self::Equal | Self::NotEqual => Ok(self),
            Self::Unsupported => Err(RawMemError::not_supported("compare")),
            Self::InvalidAddress => Err(RawMemError::InvalidAddress),
        }
    }
}

impl CopyStatus {
    /// True only for `Copied`
    pub fn is_success(self) -> bool {
        matches!(self, Self::Copied)
    }

    /// True for every outcome other than `Copied`
    pub fn is_error(self) -> bool {
        !self.is_success()
    }

    /// Bridge into the crate error type
    pub fn ok(self) -> crate::Result<()> {
        match self {
            Self::Copied => Ok(()),
            Self::NotCopied => Err(RawMemError::not_supported("copy verification")),
            Self::Unsupported => Err(RawMemError::not_supported("copy")),
            Self::InvalidAddress => Err(RawMemError::InvalidAddress),
        }
    }
}

impl FillStatus {
    /// True only for `Filled`
    pub fn is_success(self) -> bool {
        matches!(self, Self::Filled)
    }

    /// True for every outcome other than `Filled`
    pub fn is_error(self) -> bool {
        !self.is_success()
    }

    /// Bridge into the crate error type
    pub fn ok(self) -> crate::Result<()> {
        match self {
            Self::Filled => Ok(()),
            Self::NotFilled => Err(RawMemError::not_supported("fill verification")),
            Self::Unsupported => Err(RawMemError::not_supported("fill")),
            Self::InvalidAddress => Err(RawMemError::InvalidAddress),
        }
    }
}
