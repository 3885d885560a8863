//! Error handling for address placement

use core::fmt;

/// Kernel errno for an invalid argument
pub const EINVAL: i32 = 22;
/// Kernel errno for exhausted memory or address space
pub const ENOMEM: i32 = 12;

/// Failure of a placement decision
///
/// Only two kinds exist. Equality compares the kind and ignores the
/// diagnostic message, so callers can match on `Error::invalid()` directly.
#[derive(Debug, Clone, Copy)]
pub enum Error {
    /// The request can never be satisfied as stated
    InvalidArgument(&'static str),
    /// No free region of the requested size and alignment exists
    OutOfSpace,
}

impl Error {
    /// An invalid-argument error without a diagnostic, for comparisons
    pub const fn invalid() -> Self {
        Error::InvalidArgument("")
    }

    /// Kernel errno for this error
    pub const fn errno(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => EINVAL,
            Error::OutOfSpace => ENOMEM,
        }
    }

    /// Negative errno, as a syscall layer hands it back to user space
    pub const fn to_syscall_return(&self) -> isize {
        -(self.errno() as isize)
    }

    /// Whether the caller may retry with different parameters
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Error::OutOfSpace)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

impl Eq for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) if msg.is_empty() => write!(f, "Invalid argument"),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::OutOfSpace => write!(f, "No free address range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for placement operations
pub type Result<T> = core::result::Result<T, Error>;

/// Creates a new invalid argument error
pub const fn invalid_argument(msg: &'static str) -> Error {
    Error::InvalidArgument(msg)
}

/// Creates a new out of space error
pub const fn out_of_space() -> Error {
    Error::OutOfSpace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_message() {
        assert_eq!(invalid_argument("length exceeds task size"), Error::invalid());
        assert_ne!(invalid_argument("x"), out_of_space());
    }

    #[test]
    fn test_errno_mapping() {
        assert_eq!(Error::invalid().errno(), EINVAL);
        assert_eq!(out_of_space().errno(), ENOMEM);
        assert_eq!(out_of_space().to_syscall_return(), -12);
        assert!(out_of_space().is_retryable());
        assert!(!Error::invalid().is_retryable());
    }
}
