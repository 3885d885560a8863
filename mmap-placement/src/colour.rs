//! Cache colouring for VIPT data caches
//!
//! On a virtually indexed, physically tagged cache whose way size exceeds
//! the page size, the index bits above the page offset come from the
//! virtual address. Two mappings of one physical page then only share cache
//! lines if their virtual addresses agree modulo the alias period (`SHMLBA`).
//! A shared or file-backed page must therefore always be mapped at an
//! address whose "colour" matches its offset in the backing object.

use mman_api::error::{invalid_argument, Result};

use crate::page::{align_up, checked_align_up, pgoff_to_bytes};

/// Colour offset of file page `pgoff` within one alias period
#[inline]
pub const fn colour_offset(pgoff: usize, shmlba: usize, page_size: usize) -> usize {
    pgoff_to_bytes(pgoff, page_size) & (shmlba - 1)
}

/// Smallest address at or above `addr` that has the colour of file page `pgoff`
///
/// Rounds `addr` up to the alias period, then adds the colour offset of
/// `pgoff`. Total: near the top of the address space the result wraps.
#[inline]
pub const fn colour_align(addr: usize, pgoff: usize, shmlba: usize, page_size: usize) -> usize {
    align_up(addr, shmlba).wrapping_add(colour_offset(pgoff, shmlba, page_size))
}

/// [`colour_align`] that reports overflow instead of wrapping
#[inline]
pub const fn checked_colour_align(
    addr: usize,
    pgoff: usize,
    shmlba: usize,
    page_size: usize,
) -> Option<usize> {
    match checked_align_up(addr, shmlba) {
        Some(base) => base.checked_add(colour_offset(pgoff, shmlba, page_size)),
        None => None,
    }
}

/// Whether `addr` has the colour of file page `pgoff`
#[inline]
pub const fn is_colour_aligned(addr: usize, pgoff: usize, shmlba: usize, page_size: usize) -> bool {
    addr.wrapping_sub(pgoff_to_bytes(pgoff, page_size)) & (shmlba - 1) == 0
}

/// Data cache aliasing properties of the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheAliasConfig {
    aliasing: bool,
    shmlba: usize,
    page_size: usize,
}

impl CacheAliasConfig {
    /// Create a validated configuration
    ///
    /// `page_size` and `shmlba` must be powers of two and `shmlba` must be at
    /// least one page.
    ///
    /// # Errors
    /// `InvalidArgument` if either size violates the above.
    pub const fn new(aliasing: bool, shmlba: usize, page_size: usize) -> Result<Self> {
        if !page_size.is_power_of_two() {
            return Err(invalid_argument("page size must be a power of two"));
        }
        if !shmlba.is_power_of_two() {
            return Err(invalid_argument("alias period must be a power of two"));
        }
        if shmlba < page_size {
            return Err(invalid_argument("alias period smaller than a page"));
        }
        Ok(Self { aliasing, shmlba, page_size })
    }

    /// A cache that never aliases (PIPT, or VIPT with way size <= page size)
    pub const fn non_aliasing(page_size: usize) -> Result<Self> {
        Self::new(false, page_size, page_size)
    }

    /// An aliasing VIPT cache with alias period `shmlba`
    pub const fn vipt_aliasing(shmlba: usize, page_size: usize) -> Result<Self> {
        Self::new(true, shmlba, page_size)
    }

    /// ARC700 with an aliasing D-cache: 8K pages, `SHMLBA` of two pages
    pub const fn arc700() -> Self {
        Self { aliasing: true, shmlba: 2 * 8192, page_size: 8192 }
    }

    /// Whether the data cache can alias
    pub const fn is_aliasing(&self) -> bool {
        self.aliasing
    }

    /// Alias period in bytes
    pub const fn shmlba(&self) -> usize {
        self.shmlba
    }

    /// Page size in bytes
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of distinct page colours
    pub const fn colours(&self) -> usize {
        self.shmlba / self.page_size
    }

    /// Alignment mask handed to the free-area search
    pub const fn align_mask(&self, do_align: bool) -> usize {
        if do_align { self.shmlba - 1 } else { 0 }
    }

    /// [`colour_align`] with this cache's alias period and page size
    pub const fn colour_align(&self, addr: usize, pgoff: usize) -> usize {
        colour_align(addr, pgoff, self.shmlba, self.page_size)
    }

    /// [`checked_colour_align`] with this cache's alias period and page size
    pub const fn checked_colour_align(&self, addr: usize, pgoff: usize) -> Option<usize> {
        checked_colour_align(addr, pgoff, self.shmlba, self.page_size)
    }

    /// [`is_colour_aligned`] with this cache's alias period and page size
    pub const fn is_colour_aligned(&self, addr: usize, pgoff: usize) -> bool {
        is_colour_aligned(addr, pgoff, self.shmlba, self.page_size)
    }
}
