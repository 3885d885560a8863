//! Huge page size encoding in the `mmap` flags word
//!
//! When `MAP_HUGETLB` is given and a size other than the default huge page
//! size is wanted, `log2(size)` is stored in a 6-bit field at
//! [`MAP_HUGE_SHIFT`]. Which sizes the running system supports is the
//! caller's business; placement never looks at these bits.

use static_assertions::const_assert;

/// Bit position of the encoded huge page size
pub const MAP_HUGE_SHIFT: u32 = 26;
/// Width mask of the encoded huge page size (unshifted)
pub const MAP_HUGE_MASK: u32 = 0x3f;

/// Encode a huge page size given as `log2(bytes)`
pub const fn huge_page_encode(log2: u32) -> u32 {
    (log2 & MAP_HUGE_MASK) << MAP_HUGE_SHIFT
}

/// 16 KiB huge pages
pub const MAP_HUGE_16KB: u32 = huge_page_encode(14);
/// 64 KiB huge pages
pub const MAP_HUGE_64KB: u32 = huge_page_encode(16);
/// 512 KiB huge pages
pub const MAP_HUGE_512KB: u32 = huge_page_encode(19);
/// 1 MiB huge pages
pub const MAP_HUGE_1MB: u32 = huge_page_encode(20);
/// 2 MiB huge pages
pub const MAP_HUGE_2MB: u32 = huge_page_encode(21);
/// 8 MiB huge pages
pub const MAP_HUGE_8MB: u32 = huge_page_encode(23);
/// 16 MiB huge pages
pub const MAP_HUGE_16MB: u32 = huge_page_encode(24);
/// 32 MiB huge pages
pub const MAP_HUGE_32MB: u32 = huge_page_encode(25);
/// 256 MiB huge pages
pub const MAP_HUGE_256MB: u32 = huge_page_encode(28);
/// 512 MiB huge pages
pub const MAP_HUGE_512MB: u32 = huge_page_encode(29);
/// 1 GiB huge pages
pub const MAP_HUGE_1GB: u32 = huge_page_encode(30);
/// 2 GiB huge pages
pub const MAP_HUGE_2GB: u32 = huge_page_encode(31);
/// 16 GiB huge pages
pub const MAP_HUGE_16GB: u32 = huge_page_encode(34);

// The field must fit above every MAP_* flag bit and inside the word
const_assert!(MAP_HUGE_SHIFT + 6 <= u32::BITS);
const_assert!(crate::mman::MAP_HUGETLB < 1 << MAP_HUGE_SHIFT);

/// Decode the requested huge page size in bytes
///
/// Returns `None` when no explicit size is encoded (the default huge page
/// size applies).
pub const fn huge_page_size(flags: u32) -> Option<u64> {
    let log2 = (flags >> MAP_HUGE_SHIFT) & MAP_HUGE_MASK;
    if log2 == 0 {
        None
    } else {
        Some(1u64 << log2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_sizes() {
        assert_eq!(huge_page_size(MAP_HUGE_2MB), Some(2 * 1024 * 1024));
        assert_eq!(huge_page_size(MAP_HUGE_16GB), Some(16 << 30));
        assert_eq!(huge_page_size(0), None);
    }

    #[test]
    fn test_decode_ignores_low_flags() {
        let flags = MAP_HUGE_64KB | crate::mman::MAP_HUGETLB | crate::mman::MAP_PRIVATE;
        assert_eq!(huge_page_size(flags), Some(64 * 1024));
    }
}
