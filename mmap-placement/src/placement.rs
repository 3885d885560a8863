//! Placement decision for new mappings
//!
//! A request is resolved along exactly one of three paths, tried in order:
//!
//! 1. **Fixed**: the caller demands `addr`. It is returned unchanged after the
//!    colour check; whatever is mapped there gets replaced when the mapping is
//!    materialized.
//! 2. **Hint**: a non-zero `addr` is a suggestion. It is aligned and used if
//!    the range below the next mapping's guard gap is free.
//! 3. **Search**: the free-area search over `[mmap_base, TASK_SIZE)` decides.
//!
//! Colour alignment is only enforced when the D-cache aliases and the
//! mapping can be seen through more than one virtual address, i.e. it is
//! shared or backed by a file.

use bitflags::bitflags;
use mman_api::error::{invalid_argument, Result};
use mman_api::MapFlags;

use crate::colour::CacheAliasConfig;
use crate::interval::{IntervalQuery, IntervalSearch};
use crate::layout::AddressSpaceBounds;
use crate::page::{checked_align_up, pgoff_to_bytes};

bitflags! {
    /// Request properties relevant to placement
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlacementFlags: u32 {
        /// The exact address must be used
        const FIXED = 1 << 0;
        /// Changes are shared with other mappings of the object
        const SHARED = 1 << 1;
        /// The mapping is backed by a file
        const FILE_BACKED = 1 << 2;
    }
}

impl PlacementFlags {
    /// Derive placement flags from an `mmap` flags word
    pub const fn from_mmap(flags: MapFlags, file_backed: bool) -> Self {
        let mut bits = 0;
        if flags.is_fixed() {
            bits |= Self::FIXED.bits();
        }
        if flags.is_shared() {
            bits |= Self::SHARED.bits();
        }
        if file_backed {
            bits |= Self::FILE_BACKED.bits();
        }
        Self::from_bits_truncate(bits)
    }
}

/// A single placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappingRequest {
    hint: usize,
    length: usize,
    pgoff: usize,
    flags: PlacementFlags,
}

impl MappingRequest {
    /// Request `length` bytes with no hint, file offset zero and no flags
    pub const fn new(length: usize) -> Self {
        Self { hint: 0, length, pgoff: 0, flags: PlacementFlags::empty() }
    }

    /// Suggest (or, with [`PlacementFlags::FIXED`], demand) an address
    pub const fn with_hint(mut self, addr: usize) -> Self {
        self.hint = addr;
        self
    }

    /// Offset of the mapping in its backing object, in pages
    pub const fn with_pgoff(mut self, pgoff: usize) -> Self {
        self.pgoff = pgoff;
        self
    }

    /// Set the placement flags
    pub const fn with_flags(mut self, flags: PlacementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The hinted address, if any
    pub const fn hint(&self) -> Option<usize> {
        if self.hint == 0 { None } else { Some(self.hint) }
    }

    /// The raw address argument; zero when no hint was given
    pub const fn addr(&self) -> usize {
        self.hint
    }

    /// Requested length in bytes
    pub const fn length(&self) -> usize {
        self.length
    }

    /// File offset in pages
    pub const fn pgoff(&self) -> usize {
        self.pgoff
    }

    /// Placement flags
    pub const fn flags(&self) -> PlacementFlags {
        self.flags
    }

    /// Whether the address is mandatory
    pub const fn is_fixed(&self) -> bool {
        self.flags.contains(PlacementFlags::FIXED)
    }
}

/// Whether `request` must be colour aligned on `cache`
///
/// Private anonymous memory is only ever reachable through one virtual
/// address, so it cannot alias even on an aliasing cache.
pub const fn alignment_required(request: &MappingRequest, cache: &CacheAliasConfig) -> bool {
    cache.is_aliasing()
        && request.flags.intersects(PlacementFlags::SHARED.union(PlacementFlags::FILE_BACKED))
}

/// Pick the address for a new mapping
///
/// `lookup` must stay unchanged until the resulting mapping is inserted;
/// the caller holds the address space write lock across both steps.
///
/// # Errors
/// * `InvalidArgument` - zero length, a fixed address with the wrong colour,
///   or a length larger than the address space
/// * `OutOfSpace` - passed through from [`IntervalSearch::search`]
pub fn decide<S>(
    request: &MappingRequest,
    bounds: &AddressSpaceBounds,
    cache: &CacheAliasConfig,
    lookup: &S,
) -> Result<usize>
where
    S: IntervalSearch + ?Sized,
{
    if request.length == 0 {
        mm_debug!("placement: rejecting zero-length request");
        return Err(invalid_argument("zero-length mapping"));
    }

    let do_align = alignment_required(request, cache);

    if request.is_fixed() {
        return place_fixed(request, cache, do_align);
    }

    // Whole pages only, so every candidate stays page aligned
    let length = checked_align_up(request.length, cache.page_size())
        .filter(|&len| len <= bounds.upper());
    let Some(length) = length else {
        mm_debug!(
            "placement: length {:#x} exceeds task size {:#x}",
            request.length,
            bounds.upper()
        );
        return Err(invalid_argument("length exceeds address space"));
    };

    if let Some(addr) = try_hint(request, length, bounds, cache, do_align, lookup) {
        mm_trace!("placement: using hint {:#x} (len {:#x})", addr, length);
        return Ok(addr);
    }

    let query = IntervalQuery {
        length,
        low_limit: bounds.lower(),
        high_limit: bounds.upper(),
        align_mask: cache.align_mask(do_align),
        align_offset: pgoff_to_bytes(request.pgoff, cache.page_size()),
    };
    mm_trace!(
        "placement: searching [{:#x}, {:#x}) for {:#x} bytes, mask {:#x} offset {:#x}",
        query.low_limit,
        query.high_limit,
        query.length,
        query.align_mask,
        query.align_offset
    );

    let result = lookup.search(&query);
    match result {
        Ok(addr) => mm_trace!("placement: search returned {:#x}", addr),
        Err(err) => mm_debug!("placement: search failed: {}", err),
    }
    result
}

/// MAP_FIXED: only the colour is checked, overlap and bounds are not
fn place_fixed(request: &MappingRequest, cache: &CacheAliasConfig, do_align: bool) -> Result<usize> {
    let addr = request.hint;
    if do_align && !cache.is_colour_aligned(addr, request.pgoff) {
        mm_debug!(
            "placement: fixed address {:#x} does not match colour of pgoff {:#x}",
            addr,
            request.pgoff
        );
        return Err(invalid_argument("fixed address has the wrong cache colour"));
    }
    mm_trace!("placement: fixed at {:#x}", addr);
    Ok(addr)
}

/// The aligned hint if `[hint, hint + length)` is free, else `None`
fn try_hint<S>(
    request: &MappingRequest,
    length: usize,
    bounds: &AddressSpaceBounds,
    cache: &CacheAliasConfig,
    do_align: bool,
    lookup: &S,
) -> Option<usize>
where
    S: IntervalSearch + ?Sized,
{
    let hint = request.hint()?;
    let candidate = if do_align {
        cache.checked_colour_align(hint, request.pgoff)
    } else {
        checked_align_up(hint, cache.page_size())
    };
    let Some(addr) = candidate else {
        mm_warn!("placement: hint {:#x} cannot be aligned, ignoring it", hint);
        return None;
    };

    if !bounds.fits_below_top(addr, length) {
        return None;
    }

    let end = addr + length;
    match lookup.find_nearest(addr) {
        Some(next) if end > lookup.guarded_start(&next) => {
            mm_trace!(
                "placement: hint {:#x} collides with [{:#x}, {:#x})",
                addr,
                next.start,
                next.end
            );
            None
        }
        _ => Some(addr),
    }
}

/// Placement for one address space: bounds, cache facts and a snapshot of
/// the existing mappings
#[derive(Debug)]
pub struct PlacementPolicy<'a, S: ?Sized> {
    bounds: AddressSpaceBounds,
    cache: CacheAliasConfig,
    space: &'a S,
}

impl<'a, S> PlacementPolicy<'a, S>
where
    S: IntervalSearch + ?Sized,
{
    /// Creates a policy over `space`
    pub const fn new(bounds: AddressSpaceBounds, cache: CacheAliasConfig, space: &'a S) -> Self {
        Self { bounds, cache, space }
    }

    /// The search window
    pub const fn bounds(&self) -> &AddressSpaceBounds {
        &self.bounds
    }

    /// The cache aliasing facts
    pub const fn cache(&self) -> &CacheAliasConfig {
        &self.cache
    }

    /// See [`decide`]
    pub fn decide(&self, request: &MappingRequest) -> Result<usize> {
        decide(request, &self.bounds, &self.cache, self.space)
    }

    /// Pick an address for `length` bytes at file page `pgoff`
    ///
    /// `hint` of zero means no preference.
    pub fn place(&self, hint: usize, length: usize, pgoff: usize, flags: PlacementFlags) -> Result<usize> {
        let request = MappingRequest::new(length)
            .with_hint(hint)
            .with_pgoff(pgoff)
            .with_flags(flags);
        self.decide(&request)
    }
}
