//! User address space bounds used by placement
//!
//! The search window of a process runs from its mapping base (where the
//! top-down or bottom-up free-area search stops) to the maximum user address
//! (`TASK_SIZE`, exclusive).

use mman_api::error::{invalid_argument, Result};

use crate::page::is_aligned;

/// ARC user address space size
pub const ARC_TASK_SIZE: usize = 0x6000_0000;
/// ARC base of the mmap region
pub const ARC_TASK_UNMAPPED_BASE: usize = ARC_TASK_SIZE / 3;
/// ARC default page size
pub const ARC_PAGE_SIZE: usize = 8192;

/// Per-process placement window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressSpaceBounds {
    /// Lowest address the free-area search may return (`mmap_base`)
    mmap_base: usize,
    /// Maximum user address, exclusive (`TASK_SIZE`)
    task_size: usize,
}

impl AddressSpaceBounds {
    /// Create validated bounds
    ///
    /// # Errors
    /// `InvalidArgument` if `page_size` is not a power of two, either bound is
    /// not page-aligned, or `mmap_base > task_size`.
    pub const fn new(mmap_base: usize, task_size: usize, page_size: usize) -> Result<Self> {
        if !page_size.is_power_of_two() {
            return Err(invalid_argument("page size must be a power of two"));
        }
        if !is_aligned(mmap_base, page_size) || !is_aligned(task_size, page_size) {
            return Err(invalid_argument("address space bounds must be page-aligned"));
        }
        if mmap_base > task_size {
            return Err(invalid_argument("mmap base above task size"));
        }
        Ok(Self { mmap_base, task_size })
    }

    /// The ARC user layout
    pub const fn arc() -> Self {
        Self { mmap_base: ARC_TASK_UNMAPPED_BASE, task_size: ARC_TASK_SIZE }
    }

    /// Lower bound of the search window
    #[inline]
    pub const fn lower(&self) -> usize {
        self.mmap_base
    }

    /// Upper bound of the search window and of every non-fixed mapping
    #[inline]
    pub const fn upper(&self) -> usize {
        self.task_size
    }

    /// Size of the search window
    #[inline]
    pub const fn span(&self) -> usize {
        self.task_size - self.mmap_base
    }

    /// Whether `[addr, addr + len)` lies below the upper bound
    #[inline]
    pub const fn fits_below_top(&self, addr: usize, len: usize) -> bool {
        len <= self.task_size && addr <= self.task_size - len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_layout() {
        let bounds = AddressSpaceBounds::arc();
        assert_eq!(bounds.lower(), 0x2000_0000);
        assert_eq!(bounds.upper(), 0x6000_0000);
        assert_eq!(bounds.span(), 0x4000_0000);
        assert_eq!(AddressSpaceBounds::new(bounds.lower(), bounds.upper(), ARC_PAGE_SIZE), Ok(bounds));
    }

    #[test]
    fn test_bounds_validation() {
        assert!(AddressSpaceBounds::new(0x2000_0000, 0x1000_0000, 4096).is_err());
        assert!(AddressSpaceBounds::new(0x2000_0800, 0x6000_0000, 4096).is_err());
        assert!(AddressSpaceBounds::new(0x1000, 0x1000, 4096).is_ok());
    }

    #[test]
    fn test_fits_below_top() {
        let bounds = AddressSpaceBounds::arc();
        assert!(bounds.fits_below_top(0x5fff_f000, 0x1000));
        assert!(!bounds.fits_below_top(0x5fff_f000, 0x2000));
        assert!(!bounds.fits_below_top(0, ARC_TASK_SIZE + 1));
    }
}
