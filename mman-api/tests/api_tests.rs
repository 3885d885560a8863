//! ABI tests

use mman_api::hugetlb::*;
use mman_api::mman::*;
use mman_api::overcommit::*;
use mman_api::{Error, MapFlags, OvercommitPolicy};

#[test]
fn test_map_type_values() {
    // These are user ABI
    assert_eq!(MAP_SHARED, 0x01);
    assert_eq!(MAP_PRIVATE, 0x02);
    assert_eq!(MAP_SHARED_VALIDATE, 0x03);
    assert_eq!(MapFlags::SHARED_VALIDATE, MapFlags::SHARED | MapFlags::PRIVATE);
}

#[test]
fn test_shared_validate_is_shared() {
    let flags = MapFlags::from_bits_retain(MAP_SHARED_VALIDATE | MAP_FIXED);
    assert!(flags.is_shared());
    assert!(flags.is_validated());
    assert!(flags.is_fixed());
}

#[test]
fn test_mremap_values() {
    assert_eq!(MREMAP_MAYMOVE, 1);
    assert_eq!(MREMAP_FIXED, 2);
    assert_eq!(MREMAP_DONTUNMAP, 4);
}

#[test]
fn test_overcommit_modes() {
    assert_eq!(OvercommitPolicy::default(), OvercommitPolicy::Guess);
    assert_eq!(OvercommitPolicy::try_from(OVERCOMMIT_ALWAYS), Ok(OvercommitPolicy::Always));
    assert_eq!(OvercommitPolicy::try_from(2), Ok(OvercommitPolicy::Never));
    assert_eq!(OvercommitPolicy::try_from(3), Err(Error::invalid()));
    assert_eq!(OvercommitPolicy::Never.as_raw(), 2);
    assert_eq!(OvercommitPolicy::Always.to_string(), "always");
}

#[test]
fn test_huge_page_encodings() {
    assert_eq!(MAP_HUGE_SHIFT, 26);
    assert_eq!(MAP_HUGE_MASK, 0x3f);
    assert_eq!(MAP_HUGE_16KB, 14 << 26);
    assert_eq!(MAP_HUGE_1GB, 30 << 26);

    let all = [
        (MAP_HUGE_16KB, 16u64 << 10),
        (MAP_HUGE_64KB, 64 << 10),
        (MAP_HUGE_512KB, 512 << 10),
        (MAP_HUGE_1MB, 1 << 20),
        (MAP_HUGE_2MB, 2 << 20),
        (MAP_HUGE_8MB, 8 << 20),
        (MAP_HUGE_16MB, 16 << 20),
        (MAP_HUGE_32MB, 32 << 20),
        (MAP_HUGE_256MB, 256 << 20),
        (MAP_HUGE_512MB, 512 << 20),
        (MAP_HUGE_1GB, 1 << 30),
        (MAP_HUGE_2GB, 2 << 30),
        (MAP_HUGE_16GB, 16 << 30),
    ];
    for (encoded, bytes) in all {
        assert_eq!(huge_page_size(encoded), Some(bytes));
    }
}

#[test]
fn test_error_display() {
    assert_eq!(Error::OutOfSpace.to_string(), "No free address range");
    assert_eq!(
        Error::InvalidArgument("misaligned").to_string(),
        "Invalid argument: misaligned"
    );
}
