//! Parallel traversal family
//!
//! Same callback contracts as the sequential forms, unspecified visit
//! order, every live slot exactly once. The unary forms dispatch to the
//! store's own fork-join hooks; the binary forms require both operands to
//! expose their tiles as a contiguous run ([`TileSeq`]) with the same
//! block size, so the two runs split along the same boundary and slot `i`
//! of one operand always travels with slot `i` of the other.

use crate::engine::split;
use crate::record::Record;
use crate::store::{Store, Table, TileSeq};

/// Parallel [`for_each`](crate::for_each).
pub fn par_for_each<C, F>(c: &mut C, f: F)
where
    C: Store,
    F: for<'r> Fn(<C::Record as Record>::RefMut<'r>) + Sync,
    C::Record: Send,
    <C::Record as Record>::Columns: Send,
{
    c.par_each(f);
}

/// Parallel [`indexed_for_each`](crate::indexed_for_each).
pub fn par_indexed_for_each<C, F>(c: &mut C, f: F)
where
    C: Store,
    F: for<'r> Fn(usize, <C::Record as Record>::RefMut<'r>) + Sync,
    C::Record: Send,
    <C::Record as Record>::Columns: Send,
{
    c.par_indexed(f);
}

/// Parallel [`for_each_range`](crate::for_each_range).
///
/// Flat stores hand each task its chunk as the tile, so `start..end` is
/// always chunk-relative; use the indexed form when the callback needs
/// global positions.
pub fn par_for_each_range<C, F>(c: &mut C, f: F)
where
    C: Store,
    F: for<'t> Fn(usize, usize, C::Tile<'t>) + Sync,
    C::Record: Send,
    <C::Record as Record>::Columns: Send,
{
    c.par_range(f);
}

/// Parallel [`indexed_for_each_range`](crate::indexed_for_each_range):
/// `f(start, end, base, tile)` with `base + j` the global position.
pub fn par_indexed_for_each_range<C, F>(c: &mut C, f: F)
where
    C: Store,
    F: for<'t> Fn(usize, usize, usize, C::Tile<'t>) + Sync,
    C::Record: Send,
    <C::Record as Record>::Columns: Send,
{
    c.par_indexed_range(f);
}

fn paired_prologue<C1, C2, const B: usize>(c1: &C1, c2: &C2) -> Option<(usize, usize, usize)>
where
    C1: TileSeq<B>,
    C2: TileSeq<B>,
{
    let n = c1.len();
    assert_eq!(
        n,
        c2.len(),
        "lock-step traversal requires equal collection lengths"
    );
    if n == 0 {
        return None;
    }
    let nt = n.div_ceil(B);
    let tail = n - (nt - 1) * B;
    Some((nt, tail, split::grain(nt)))
}

/// Parallel lock-step visit of two tiled collections sharing block size
/// `B`. Lengths must match (checked).
pub fn par_for_each2<C1, C2, F, const B: usize>(c1: &mut C1, c2: &mut C2, f: F)
where
    C1: TileSeq<B>,
    C2: TileSeq<B>,
    F: for<'a, 'b> Fn(
            <C1::Record as Record>::RefMut<'a>,
            <C2::Record as Record>::RefMut<'b>,
        ) + Sync,
    C1::Record: Send,
    C2::Record: Send,
    <C1::Record as Record>::Columns: Send,
    <C2::Record as Record>::Columns: Send,
{
    let Some((nt, tail, grain)) = paired_prologue(c1, c2) else {
        return;
    };
    let (ta, tb) = (c1.tile_slice_mut(), c2.tile_slice_mut());
    split::bisect_tiles2(
        &mut ta[..nt],
        &mut tb[..nt],
        0,
        tail,
        grain,
        &|_, live, x: &mut Table<C1::Record, B>, y: &mut Table<C2::Record, B>| {
            for j in 0..live {
                f(x.view_mut(j), y.view_mut(j));
            }
        },
    );
}

/// Parallel lock-step indexed visit of two tiled collections.
pub fn par_indexed_for_each2<C1, C2, F, const B: usize>(c1: &mut C1, c2: &mut C2, f: F)
where
    C1: TileSeq<B>,
    C2: TileSeq<B>,
    F: for<'a, 'b> Fn(
            usize,
            <C1::Record as Record>::RefMut<'a>,
            <C2::Record as Record>::RefMut<'b>,
        ) + Sync,
    C1::Record: Send,
    C2::Record: Send,
    <C1::Record as Record>::Columns: Send,
    <C2::Record as Record>::Columns: Send,
{
    let Some((nt, tail, grain)) = paired_prologue(c1, c2) else {
        return;
    };
    let (ta, tb) = (c1.tile_slice_mut(), c2.tile_slice_mut());
    split::bisect_tiles2(
        &mut ta[..nt],
        &mut tb[..nt],
        0,
        tail,
        grain,
        &|base, live, x: &mut Table<C1::Record, B>, y: &mut Table<C2::Record, B>| {
            for j in 0..live {
                f(base + j, x.view_mut(j), y.view_mut(j));
            }
        },
    );
}

/// Parallel lock-step block visit of two tiled collections:
/// `f(start, end, tile1, tile2)` per tile pair.
pub fn par_for_each_range2<C1, C2, F, const B: usize>(c1: &mut C1, c2: &mut C2, f: F)
where
    C1: TileSeq<B>,
    C2: TileSeq<B>,
    F: for<'a, 'b> Fn(usize, usize, &'a mut Table<C1::Record, B>, &'b mut Table<C2::Record, B>)
        + Sync,
    C1::Record: Send,
    C2::Record: Send,
    <C1::Record as Record>::Columns: Send,
    <C2::Record as Record>::Columns: Send,
{
    let Some((nt, tail, grain)) = paired_prologue(c1, c2) else {
        return;
    };
    let (ta, tb) = (c1.tile_slice_mut(), c2.tile_slice_mut());
    split::bisect_tiles2(
        &mut ta[..nt],
        &mut tb[..nt],
        0,
        tail,
        grain,
        &|_, live, x: &mut Table<C1::Record, B>, y: &mut Table<C2::Record, B>| {
            f(0, live, x, y);
        },
    );
}

/// Parallel lock-step indexed block visit of two tiled collections:
/// `f(start, end, base, tile1, tile2)` per tile pair.
pub fn par_indexed_for_each_range2<C1, C2, F, const B: usize>(c1: &mut C1, c2: &mut C2, f: F)
where
    C1: TileSeq<B>,
    C2: TileSeq<B>,
    F: for<'a, 'b> Fn(
            usize,
            usize,
            usize,
            &'a mut Table<C1::Record, B>,
            &'b mut Table<C2::Record, B>,
        ) + Sync,
    C1::Record: Send,
    C2::Record: Send,
    <C1::Record as Record>::Columns: Send,
    <C2::Record as Record>::Columns: Send,
{
    let Some((nt, tail, grain)) = paired_prologue(c1, c2) else {
        return;
    };
    let (ta, tb) = (c1.tile_slice_mut(), c2.tile_slice_mut());
    split::bisect_tiles2(
        &mut ta[..nt],
        &mut tb[..nt],
        0,
        tail,
        grain,
        &|base, live, x: &mut Table<C1::Record, B>, y: &mut Table<C2::Record, B>| {
            f(0, live, base, x, y);
        },
    );
}
