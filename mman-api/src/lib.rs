//! mman API - ABI values and error types shared by the mapping subsystem
//!
//! This crate carries the stable user-visible constants that `mmap`-family
//! callers pass in, plus the error type every placement decision reports.
//!
//! # Architecture
//!
//! - **mman**: `MAP_*` and `MREMAP_*` flag values and the [`MapFlags`] set
//! - **overcommit**: the overcommit accounting modes (configuration only)
//! - **hugetlb**: huge page size encodings carried in the `mmap` flags word
//! - **error**: [`Error`] and the crate-wide [`Result`] alias
//!
//! # Usage
//!
//! ```rust
//! use mman_api::mman::{MapFlags, MAP_SHARED_VALIDATE};
//!
//! let flags = MapFlags::from_bits_retain(MAP_SHARED_VALIDATE);
//! assert!(flags.is_shared());
//! assert!(flags.is_validated());
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod hugetlb;
pub mod mman;
pub mod overcommit;

// Re-export commonly used types
pub use crate::error::{Error, Result};
pub use crate::mman::MapFlags;
pub use crate::overcommit::OvercommitPolicy;
