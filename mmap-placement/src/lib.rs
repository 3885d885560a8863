//! mmap placement
//!
//! Chooses the virtual address of a new mapping on CPUs whose data cache is
//! virtually indexed and can alias. Shared and file-backed mappings are
//! placed so that every virtual alias of a page has the same cache colour;
//! everything else only needs page alignment.
//!
//! The crate decides addresses, it does not create mappings. Existing
//! mappings are consulted through the [`IntervalSearch`] trait;
//! [`VmaSnapshot`] is an in-memory implementation of it.
//!
//! ```rust
//! use mmap_placement::{AddressSpaceBounds, CacheAliasConfig, PlacementFlags, PlacementPolicy, VmaSnapshot};
//!
//! let space = VmaSnapshot::new();
//! let cache = CacheAliasConfig::vipt_aliasing(16 * 1024, 4096).unwrap();
//! let bounds = AddressSpaceBounds::new(0x2000_0000, 0x6000_0000, 4096).unwrap();
//! let policy = PlacementPolicy::new(bounds, cache, &space);
//!
//! let addr = policy
//!     .place(0, 8192, 3, PlacementFlags::SHARED | PlacementFlags::FILE_BACKED)
//!     .unwrap();
//! assert_eq!(addr % (16 * 1024), 3 * 4096);
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod logging;

pub mod colour;
pub mod interval;
pub mod layout;
pub mod page;
pub mod placement;
#[cfg(feature = "alloc")]
pub mod snapshot;

use static_assertions::assert_impl_all;

// Re-export commonly used types and functions
pub use colour::{colour_align, is_colour_aligned, CacheAliasConfig};
pub use interval::{Interval, IntervalQuery, IntervalSearch};
pub use layout::AddressSpaceBounds;
pub use mman_api::{Error, Result};
pub use page::{PAGE_SHIFT, PAGE_SIZE};
pub use placement::{alignment_required, decide, MappingRequest, PlacementFlags, PlacementPolicy};
#[cfg(feature = "alloc")]
pub use snapshot::{SearchOrder, SnapshotError, VmaSnapshot};

// Decisions run under the caller's address space lock from any CPU
assert_impl_all!(CacheAliasConfig: Send, Sync, Copy);
assert_impl_all!(AddressSpaceBounds: Send, Sync, Copy);
assert_impl_all!(MappingRequest: Send, Sync, Copy);
#[cfg(feature = "alloc")]
assert_impl_all!(VmaSnapshot: Send, Sync);
#[cfg(feature = "alloc")]
assert_impl_all!(PlacementPolicy<'static, VmaSnapshot>: Send, Sync);
