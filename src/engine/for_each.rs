//! Element-wise sequential traversal

use std::ops::Range;

use crate::record::Record;
use crate::store::{compatibly_tiled, Store, TileMut};

/// Visit every live slot of `c` in position order with an exclusive view.
///
/// Tiled stores are walked tile by tile, whole tiles at full width and the
/// partial final tile as a shortened loop, so the generated code keeps the
/// fixed trip count the layout exists for.
pub fn for_each<C, F>(c: &mut C, mut f: F)
where
    C: Store,
    F: for<'r> FnMut(<C::Record as Record>::RefMut<'r>),
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
            let mut t = c.tile_mut(i);
            for j in 0..b {
                f(t.slot_mut(j));
            }
        }
        if rem > 0 {
            let mut t = c.tile_mut(whole);
            for j in 0..rem {
                f(t.slot_mut(j));
            }
        }
    } else {
        let mut t = c.tile_mut(0);
        for j in 0..n {
            f(t.slot_mut(j));
        }
    }
}

/// Lock-step visit of two collections: `f` sees slot `i` of both.
///
/// Lengths must match (checked). Compatibly tiled operands are walked tile
/// by tile; any other layout mix falls back to per-element pairing, so
/// mixing a tiled store with a flat one is legal, just slower.
pub fn for_each2<C1, C2, F>(c1: &mut C1, c2: &mut C2, mut f: F)
where
    C1: Store,
    C2: Store,
    F: for<'a, 'b> FnMut(
        <C1::Record as Record>::RefMut<'a>,
        <C2::Record as Record>::RefMut<'b>,
    ),
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
            let mut t1 = c1.tile_mut(i);
            let mut t2 = c2.tile_mut(i);
            for j in 0..b {
                f(t1.slot_mut(j), t2.slot_mut(j));
            }
        }
        if rem > 0 {
            let mut t1 = c1.tile_mut(whole);
            let mut t2 = c2.tile_mut(whole);
            for j in 0..rem {
                f(t1.slot_mut(j), t2.slot_mut(j));
            }
        }
    } else {
        for i in 0..n {
            f(c1.index_mut(i), c2.index_mut(i));
        }
    }
}

/// Lock-step visit of three collections. Same rules as [`for_each2`].
pub fn for_each3<C1, C2, C3, F>(c1: &mut C1, c2: &mut C2, c3: &mut C3, mut f: F)
where
    C1: Store,
    C2: Store,
    C3: Store,
    F: for<'a, 'b, 'c> FnMut(
        <C1::Record as Record>::RefMut<'a>,
        <C2::Record as Record>::RefMut<'b>,
        <C3::Record as Record>::RefMut<'c>,
    ),
{
    let n = c1.len();
    assert_eq!(
        n,
        c2.len(),
        "lock-step traversal requires equal collection lengths"
    );
    assert_eq!(
        n,
        c3.len(),
        "lock-step traversal requires equal collection lengths"
    );
    if n == 0 {
        return;
    }
    if compatibly_tiled::<C1, C2>() && compatibly_tiled::<C1, C3>() {
        let b = C1::TILE_SIZE;
        let whole = n / b;
        let rem = n % b;
        for i in 0..whole {
            let mut t1 = c1.tile_mut(i);
            let mut t2 = c2.tile_mut(i);
            let mut t3 = c3.tile_mut(i);
            for j in 0..b {
                f(t1.slot_mut(j), t2.slot_mut(j), t3.slot_mut(j));
            }
        }
        if rem > 0 {
            let mut t1 = c1.tile_mut(whole);
            let mut t2 = c2.tile_mut(whole);
            let mut t3 = c3.tile_mut(whole);
            for j in 0..rem {
                f(t1.slot_mut(j), t2.slot_mut(j), t3.slot_mut(j));
            }
        }
    } else {
        for i in 0..n {
            f(c1.index_mut(i), c2.index_mut(i), c3.index_mut(i));
        }
    }
}

/// Visit the slots of `span` in position order.
///
/// Tiled stores split the span into a leading partial tile, whole tiles,
/// and a trailing partial tile. Panics if the span exceeds the length.
pub fn for_each_in<C, F>(c: &mut C, span: Range<usize>, mut f: F)
where
    C: Store,
    F: for<'r> FnMut(<C::Record as Record>::RefMut<'r>),
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
            let mut t = c.tile_mut(t0);
            for j in s0..s1 {
                f(t.slot_mut(j));
            }
            return;
        }
        {
            let mut t = c.tile_mut(t0);
            for j in s0..b {
                f(t.slot_mut(j));
            }
        }
        for i in t0 + 1..t1 {
            let mut t = c.tile_mut(i);
            for j in 0..b {
                f(t.slot_mut(j));
            }
        }
        if s1 > 0 {
            let mut t = c.tile_mut(t1);
            for j in 0..s1 {
                f(t.slot_mut(j));
            }
        }
    } else {
        for i in span {
            f(c.index_mut(i));
        }
    }
}
