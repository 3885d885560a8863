//! In-memory interval store implementing [`IntervalSearch`]
//!
//! Keeps the mappings of one address space ordered by end address, like a
//! VMA tree keyed for `find_vma`. Mapping creation is the caller's job: a
//! snapshot only records intervals and answers placement queries.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Bound::{Excluded, Unbounded};

use mman_api::error::{out_of_space, Result};

use crate::colour::CacheAliasConfig;
use crate::interval::{Interval, IntervalQuery, IntervalSearch};
use crate::page::{align_down, checked_align_up, PAGE_SIZE};

/// Order in which [`VmaSnapshot::search`] scans free gaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchOrder {
    /// Highest suitable address first (the usual mmap layout)
    #[default]
    TopDown,
    /// Lowest suitable address first (legacy layout)
    BottomUp,
}

/// Rejected snapshot update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// The interval covers no bytes
    Empty,
    /// The interval overlaps an existing one
    Overlap(Interval),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Empty => write!(f, "Empty interval"),
            SnapshotError::Overlap(iv) => {
                write!(f, "Overlaps existing interval [{:#x}, {:#x})", iv.start, iv.end)
            }
        }
    }
}

/// Snapshot of the mappings of one address space
#[derive(Debug, Clone)]
pub struct VmaSnapshot {
    /// Non-overlapping intervals keyed by end address
    by_end: BTreeMap<usize, Interval>,
    guard_gap: usize,
    page_size: usize,
    order: SearchOrder,
}

impl Default for VmaSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl VmaSnapshot {
    /// Empty snapshot: 4K pages, one page of guard gap, top-down search
    pub const fn new() -> Self {
        Self {
            by_end: BTreeMap::new(),
            guard_gap: PAGE_SIZE,
            page_size: PAGE_SIZE,
            order: SearchOrder::TopDown,
        }
    }

    /// Empty snapshot for `cache`: its page size and a one page guard gap
    pub fn for_cache(cache: &CacheAliasConfig) -> Self {
        Self::new()
            .with_page_size(cache.page_size())
            .with_guard_gap(cache.page_size())
    }

    /// Set the unmapped gap kept below every interval
    pub fn with_guard_gap(mut self, guard_gap: usize) -> Self {
        self.guard_gap = guard_gap;
        self
    }

    /// Set the page size search results are aligned to (a power of two)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the gap scan order
    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    /// Guard gap in bytes
    pub const fn guard_gap(&self) -> usize {
        self.guard_gap
    }

    /// Page size search results are aligned to
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Gap scan order
    pub const fn order(&self) -> SearchOrder {
        self.order
    }

    /// Number of intervals
    pub fn len(&self) -> usize {
        self.by_end.len()
    }

    /// Whether the snapshot holds no intervals
    pub fn is_empty(&self) -> bool {
        self.by_end.is_empty()
    }

    /// Intervals in address order
    pub fn iter(&self) -> impl Iterator<Item = &Interval> + '_ {
        self.by_end.values()
    }

    /// Record a new interval
    ///
    /// # Errors
    /// `Empty` for a zero-length interval, `Overlap` if it intersects an
    /// existing one.
    pub fn insert(&mut self, interval: Interval) -> core::result::Result<(), SnapshotError> {
        if interval.is_empty() {
            return Err(SnapshotError::Empty);
        }
        if let Some(next) = self.find_nearest(interval.start) {
            if next.overlaps(&interval) {
                return Err(SnapshotError::Overlap(next));
            }
        }
        self.by_end.insert(interval.end, interval);
        Ok(())
    }

    /// Drop the interval starting at `start`
    pub fn remove(&mut self, start: usize) -> Option<Interval> {
        let found = self.find_nearest(start).filter(|iv| iv.start == start)?;
        self.by_end.remove(&found.end)
    }

    /// Free gaps `(start, end)` between intervals, in address order
    ///
    /// Each gap ends at the guarded start of the interval above it. Gaps
    /// swallowed by a guard are dropped.
    fn gaps(&self) -> Vec<(usize, usize)> {
        let mut gaps = Vec::with_capacity(self.by_end.len() + 1);
        let mut prev_end = 0;
        for iv in self.by_end.values() {
            let gap_end = self.guarded_start(iv);
            if gap_end > prev_end {
                gaps.push((prev_end, gap_end));
            }
            prev_end = iv.end;
        }
        gaps.push((prev_end, usize::MAX));
        gaps
    }

    /// Lowest suitable address inside `[start, end)`
    fn fit_low(&self, start: usize, end: usize, query: &IntervalQuery) -> Option<usize> {
        let base = checked_align_up(start, self.page_size)?;
        let addr = base.checked_add(query.align_offset.wrapping_sub(base) & query.align_mask)?;
        (addr.checked_add(query.length)? <= end).then_some(addr)
    }

    /// Highest suitable address inside `[start, end)`
    fn fit_high(&self, start: usize, end: usize, query: &IntervalQuery) -> Option<usize> {
        let top = align_down(end.checked_sub(query.length)?, self.page_size);
        let addr = top.checked_sub(top.wrapping_sub(query.align_offset) & query.align_mask)?;
        (addr >= start).then_some(addr)
    }
}

impl IntervalSearch for VmaSnapshot {
    fn find_nearest(&self, addr: usize) -> Option<Interval> {
        self.by_end
            .range((Excluded(addr), Unbounded))
            .next()
            .map(|(_, iv)| *iv)
    }

    fn guarded_start(&self, interval: &Interval) -> usize {
        interval.start.saturating_sub(self.guard_gap)
    }

    fn search(&self, query: &IntervalQuery) -> Result<usize> {
        let clamp = |(start, end): (usize, usize)| {
            let start = start.max(query.low_limit);
            let end = end.min(query.high_limit);
            (start < end).then_some((start, end))
        };
        let gaps = self.gaps();
        let found = match self.order {
            SearchOrder::TopDown => gaps
                .into_iter()
                .rev()
                .filter_map(clamp)
                .find_map(|(start, end)| self.fit_high(start, end, query)),
            SearchOrder::BottomUp => gaps
                .into_iter()
                .filter_map(clamp)
                .find_map(|(start, end)| self.fit_low(start, end, query)),
        };
        found.ok_or_else(out_of_space)
    }
}
