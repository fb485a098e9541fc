//! Block-wise sequential traversal
//!
//! The block forms exist for the inner-loop-over-columns pattern: instead
//! of one callback per slot, the callback receives a whole tile and the
//! live slot range `start..end` within it, and runs its own tight loop
//! over contiguous column slices.

use std::ops::Range;

use crate::store::{compatibly_tiled, Store};

/// Visit `c` block by block: `f(start, end, tile)` with live slots
/// `start..end`.
///
/// Tiled stores get one call per whole tile (`0, B`) plus one shortened
/// call for the partial final tile; flat and monolithic stores get exactly
/// one call covering everything.
pub fn for_each_range<C, F>(c: &mut C, mut f: F)
where
    C: Store,
    F: for<'t> FnMut(usize, usize, C::Tile<'t>),
{
    let n = c.len();
    if n == 0 {
        return;
    }
    if C::TILED {
        let b = C::TILE_SIZE;
        let whole = n / b;
        let rem = n % b;
        for i in 0..whole {
            f(0, b, c.tile_mut(i));
        }
        if rem > 0 {
            f(0, rem, c.tile_mut(whole));
        }
    } else {
        f(0, n, c.tile_mut(0));
    }
}

/// Lock-step block visit of two collections.
///
/// Lengths must match (checked). Unlike the element forms there is no
/// per-element fallback: operands must be compatibly tiled or both flat,
/// anything else panics, because a block callback cannot straddle two
/// different tile geometries.
pub fn for_each_range2<C1, C2, F>(c1: &mut C1, c2: &mut C2, mut f: F)
where
    C1: Store,
    C2: Store,
    F: for<'a, 'b> FnMut(usize, usize, C1::Tile<'a>, C2::Tile<'b>),
{
    let n = c1.len();
    assert_eq!(
        n,
        c2.len(),
        "lock-step traversal requires equal collection lengths"
    );
    if n == 0 {
        return;
    }
    if compatibly_tiled::<C1, C2>() {
        let b = C1::TILE_SIZE;
        let whole = n / b;
        let rem = n % b;
        for i in 0..whole {
            f(0, b, c1.tile_mut(i), c2.tile_mut(i));
        }
        if rem > 0 {
            f(0, rem, c1.tile_mut(whole), c2.tile_mut(whole));
        }
    } else if !C1::TILED && !C2::TILED {
        f(0, n, c1.tile_mut(0), c2.tile_mut(0));
    } else {
        panic!("block traversal requires operands with matching layouts");
    }
}

/// Block visit restricted to `span`.
///
/// Tiled stores see a leading partial block (`start > 0`), whole blocks,
/// and a trailing partial block. Flat and monolithic stores get a single
/// call with `start..end` equal to `span` within the whole-collection
/// tile.
pub fn for_each_range_in<C, F>(c: &mut C, span: Range<usize>, mut f: F)
where
    C: Store,
    F: for<'t> FnMut(usize, usize, C::Tile<'t>),
{
    let n = c.len();
    assert!(
        span.start <= span.end && span.end <= n,
        "span {}..{} out of bounds for length {n}",
        span.start,
        span.end
    );
    if span.is_empty() {
        return;
    }
    if C::TILED && C::TILE_SIZE != usize::MAX {
        let b = C::TILE_SIZE;
        let (t0, s0) = (span.start / b, span.start % b);
        let (t1, s1) = (span.end / b, span.end % b);
        if t0 == t1 {
            f(s0, s1, c.tile_mut(t0));
            return;
        }
        f(s0, b, c.tile_mut(t0));
        for i in t0 + 1..t1 {
            f(0, b, c.tile_mut(i));
        }
        if s1 > 0 {
            f(0, s1, c.tile_mut(t1));
        }
    } else {
        f(span.start, span.end, c.tile_mut(0));
    }
}
