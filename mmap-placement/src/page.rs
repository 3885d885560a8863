//! Page granularity arithmetic
//!
//! Alignments passed to these helpers must be non-zero powers of two.

/// Default page shift (4KB pages)
pub const PAGE_SHIFT: usize = 12;
/// Default page size (4KB)
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;

/// Align address down to a multiple of `align`
#[inline]
pub const fn align_down(addr: usize, align: usize) -> usize {
    addr & !(align - 1)
}

/// Align address up to a multiple of `align`, wrapping at the top of the
/// address space
#[inline]
pub const fn align_up(addr: usize, align: usize) -> usize {
    addr.wrapping_add(align - 1) & !(align - 1)
}

/// Align address up to a multiple of `align`, or `None` on overflow
#[inline]
pub const fn checked_align_up(addr: usize, align: usize) -> Option<usize> {
    match addr.checked_add(align - 1) {
        Some(end) => Some(end & !(align - 1)),
        None => None,
    }
}

/// Check whether `addr` is a multiple of `align`
#[inline]
pub const fn is_aligned(addr: usize, align: usize) -> bool {
    addr & (align - 1) == 0
}

/// Align address down to the default page boundary
#[inline]
pub const fn page_round_down(addr: usize) -> usize {
    align_down(addr, PAGE_SIZE)
}

/// Align address up to the default page boundary
#[inline]
pub const fn page_round_up(addr: usize) -> usize {
    align_up(addr, PAGE_SIZE)
}

/// Byte offset of file page `pgoff`
///
/// Wraps like the `pgoff << PAGE_SHIFT` it stands for; only the low bits
/// matter to colouring.
#[inline]
pub const fn pgoff_to_bytes(pgoff: usize, page_size: usize) -> usize {
    pgoff.wrapping_mul(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_alignment() {
        assert_eq!(page_round_down(0x4008_1234), 0x4008_1000);
        assert_eq!(page_round_up(0x4008_1234), 0x4008_2000);
        assert_eq!(page_round_up(0x4008_2000), 0x4008_2000);
        assert!(is_aligned(0x4000, 0x4000));
        assert!(!is_aligned(0x5000, 0x4000));
    }

    #[test]
    fn test_align_up_overflow() {
        assert_eq!(checked_align_up(usize::MAX - 5, PAGE_SIZE), None);
        assert_eq!(align_up(usize::MAX - 5, PAGE_SIZE), 0);
        assert_eq!(checked_align_up(0x1001, 0x4000), Some(0x4000));
    }
}
