//! `mmap` and `mremap` flag values
//!
//! The numeric values are user ABI and must never change.

use bitflags::bitflags;
use static_assertions::const_assert_eq;

/// Share changes
pub const MAP_SHARED: u32 = 0x01;
/// Changes are private
pub const MAP_PRIVATE: u32 = 0x02;
/// Share changes and validate extension flags
pub const MAP_SHARED_VALIDATE: u32 = 0x03;
/// Mask for the mapping type bits
pub const MAP_TYPE: u32 = 0x0f;
/// Interpret addr exactly
pub const MAP_FIXED: u32 = 0x10;
/// Don't use a file
pub const MAP_ANONYMOUS: u32 = 0x20;
/// Create a huge page mapping
pub const MAP_HUGETLB: u32 = 0x40000;

/// The mapping may be moved
pub const MREMAP_MAYMOVE: u32 = 1;
/// The new address is mandatory
pub const MREMAP_FIXED: u32 = 2;
/// Keep the old mapping in place after moving
pub const MREMAP_DONTUNMAP: u32 = 4;

const_assert_eq!(MAP_SHARED | MAP_PRIVATE, MAP_SHARED_VALIDATE);
const_assert_eq!(MAP_SHARED_VALIDATE & !MAP_TYPE, 0);

bitflags! {
    /// Flags word of an `mmap` call
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapFlags: u32 {
        /// Share changes
        const SHARED = MAP_SHARED;
        /// Changes are private
        const PRIVATE = MAP_PRIVATE;
        /// Share changes and validate extension flags
        const SHARED_VALIDATE = MAP_SHARED_VALIDATE;
        /// Interpret addr exactly
        const FIXED = MAP_FIXED;
        /// Don't use a file
        const ANONYMOUS = MAP_ANONYMOUS;
        /// Create a huge page mapping
        const HUGETLB = MAP_HUGETLB;

        // Huge page size bits and arch-specific flags travel through untouched
        const _ = !0;
    }
}

impl MapFlags {
    /// The mapping type field (`MAP_SHARED`, `MAP_PRIVATE` or `MAP_SHARED_VALIDATE`)
    pub const fn map_type(self) -> u32 {
        self.bits() & MAP_TYPE
    }

    /// Whether writes are visible to other mappings of the same object
    ///
    /// `MAP_SHARED_VALIDATE` has the shared bit set and counts as shared.
    pub const fn is_shared(self) -> bool {
        self.bits() & MAP_SHARED != 0
    }

    /// Whether the caller asked for extension flag validation
    pub const fn is_validated(self) -> bool {
        self.map_type() == MAP_SHARED_VALIDATE
    }

    /// Whether the exact address must be used
    pub const fn is_fixed(self) -> bool {
        self.bits() & MAP_FIXED != 0
    }
}
