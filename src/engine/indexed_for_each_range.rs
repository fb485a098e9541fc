//! Block-wise sequential traversal carrying the block's base position

use crate::store::{compatibly_tiled, Store};

/// Block visit with position bookkeeping: `f(start, end, base, tile)`
/// where `base + j` is the global position of tile slot `j`.
///
/// For tiled stores `base` is `tile_ordinal * B`; for flat and monolithic
/// stores the single call has `base == 0` and slot positions are global
/// already.
pub fn indexed_for_each_range<C, F>(c: &mut C, mut f: F)
where
    C: Store,
    F: for<'t> FnMut(usize, usize, usize, C::Tile<'t>),
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
            f(0, b, i * b, c.tile_mut(i));
        }
        if rem > 0 {
            f(0, rem, whole * b, c.tile_mut(whole));
        }
    } else {
        f(0, n, 0, c.tile_mut(0));
    }
}

/// Lock-step indexed block visit of two collections. Layout rules as in
/// [`for_each_range2`](crate::for_each_range2).
pub fn indexed_for_each_range2<C1, C2, F>(c1: &mut C1, c2: &mut C2, mut f: F)
where
    C1: Store,
    C2: Store,
    F: for<'a, 'b> FnMut(usize, usize, usize, C1::Tile<'a>, C2::Tile<'b>),
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
            f(0, b, i * b, c1.tile_mut(i), c2.tile_mut(i));
        }
        if rem > 0 {
            f(0, rem, whole * b, c1.tile_mut(whole), c2.tile_mut(whole));
        }
    } else if !C1::TILED && !C2::TILED {
        f(0, n, 0, c1.tile_mut(0), c2.tile_mut(0));
    } else {
        panic!("block traversal requires operands with matching layouts");
    }
}
