//! Interval search seam
//!
//! Placement never walks the mapping store itself. It asks an
//! [`IntervalSearch`] implementation three questions against a snapshot the
//! caller keeps stable (write-locked) until the new mapping is inserted.

use mman_api::Result;

/// A mapped range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First mapped byte
    pub start: usize,
    /// One past the last mapped byte
    pub end: usize,
}

impl Interval {
    /// Creates a new interval
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the interval covers no bytes
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `addr` falls inside the interval
    pub const fn contains(&self, addr: usize) -> bool {
        self.start <= addr && addr < self.end
    }

    /// Whether the two intervals share at least one byte
    pub const fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Free-area search request
///
/// A result `addr` is suitable when `low_limit <= addr`,
/// `addr + length <= high_limit` and
/// `(addr - align_offset) & align_mask == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalQuery {
    /// Bytes requested
    pub length: usize,
    /// Lowest acceptable start address
    pub low_limit: usize,
    /// Highest acceptable end address (exclusive)
    pub high_limit: usize,
    /// Alias period minus one, or zero when colouring does not matter
    pub align_mask: usize,
    /// Byte offset of the mapping in its backing object
    pub align_offset: usize,
}

impl IntervalQuery {
    /// Whether `addr` satisfies the alignment constraint
    pub const fn is_aligned(&self, addr: usize) -> bool {
        addr.wrapping_sub(self.align_offset) & self.align_mask == 0
    }

    /// Whether `[addr, addr + length)` satisfies every constraint of the query
    pub const fn accepts(&self, addr: usize) -> bool {
        match addr.checked_add(self.length) {
            Some(end) => addr >= self.low_limit && end <= self.high_limit && self.is_aligned(addr),
            None => false,
        }
    }
}

/// Read-only view of an address space's existing mappings
#[cfg_attr(test, mockall::automock)]
pub trait IntervalSearch {
    /// First interval with `addr < end`, i.e. the one containing `addr` or
    /// the next one above it
    fn find_nearest(&self, addr: usize) -> Option<Interval>;

    /// Start of `interval` minus the unmapped guard gap kept below it
    fn guarded_start(&self, interval: &Interval) -> usize;

    /// Find a free region matching `query`
    ///
    /// # Errors
    /// `OutOfSpace` if no suitable region exists.
    fn search(&self, query: &IntervalQuery) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new(0x1000, 0x3000);
        assert!(a.overlaps(&Interval::new(0x2000, 0x4000)));
        assert!(!a.overlaps(&Interval::new(0x3000, 0x4000)));
        assert!(a.contains(0x2fff));
        assert!(!a.contains(0x3000));
        assert_eq!(a.len(), 0x2000);
    }

    #[test]
    fn test_query_accepts() {
        let query = IntervalQuery {
            length: 0x2000,
            low_limit: 0x10_0000,
            high_limit: 0x20_0000,
            align_mask: 0x3fff,
            align_offset: 0x3000,
        };
        assert!(query.accepts(0x10_3000));
        assert!(!query.accepts(0x10_4000));
        assert!(!query.accepts(0x0f_3000));
        assert!(!query.accepts(0x1f_f000));
        assert!(!query.accepts(usize::MAX));
    }
}
