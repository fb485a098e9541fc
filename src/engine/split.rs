//! Fork-join splitting of tile runs and element slices
//!
//! Recursive bisection with `rayon::join`, leaves no smaller than a grain.
//! Whole tiles are the unit of work for tiled stores; the partial final
//! tile travels with the rightmost split so it always runs as a shortened
//! block of its own.

use crate::record::Record;
use crate::store::Table;

/// Units of work per leaf task: `units / (8 * workers)`, clamped to
/// `1..=2048`.
pub(crate) fn grain(units: usize) -> usize {
    let workers = rayon::current_num_threads().max(1);
    (units / (8 * workers)).clamp(1, 2048)
}

/// Bisect a tile run. `f(base, live, tile)` runs once per tile; `tail` is
/// the live count of the final tile in the run.
fn bisect_tiles<R, const B: usize, F>(
    tiles: &mut [Table<R, B>],
    first: usize,
    tail: usize,
    grain: usize,
    f: &F,
) where
    R: Record,
    R::Columns: Send,
    F: Fn(usize, usize, &mut Table<R, B>) + Sync,
{
    if tiles.is_empty() {
        return;
    }
    if tiles.len() <= grain {
        let last = tiles.len() - 1;
        for (k, tile) in tiles.iter_mut().enumerate() {
            let live = if k == last { tail } else { B };
            f((first + k) * B, live, tile);
        }
    } else {
        let mid = tiles.len() / 2;
        let (lo, hi) = tiles.split_at_mut(mid);
        rayon::join(
            || bisect_tiles(lo, first, B, grain, f),
            || bisect_tiles(hi, first + mid, tail, grain, f),
        );
    }
}

/// Paired bisection of two equal-length tile runs along the same boundary.
pub(crate) fn bisect_tiles2<R1, R2, const B: usize, F>(
    a: &mut [Table<R1, B>],
    b: &mut [Table<R2, B>],
    first: usize,
    tail: usize,
    grain: usize,
    f: &F,
) where
    R1: Record,
    R2: Record,
    R1::Columns: Send,
    R2::Columns: Send,
    F: Fn(usize, usize, &mut Table<R1, B>, &mut Table<R2, B>) + Sync,
{
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return;
    }
    if a.len() <= grain {
        let last = a.len() - 1;
        for (k, (ta, tb)) in a.iter_mut().zip(b.iter_mut()).enumerate() {
            let live = if k == last { tail } else { B };
            f((first + k) * B, live, ta, tb);
        }
    } else {
        let mid = a.len() / 2;
        let (a0, a1) = a.split_at_mut(mid);
        let (b0, b1) = b.split_at_mut(mid);
        rayon::join(
            || bisect_tiles2(a0, b0, first, B, grain, f),
            || bisect_tiles2(a1, b1, first + mid, tail, grain, f),
        );
    }
}

fn bisect_slice<R, F>(slice: &mut [R], first: usize, grain: usize, f: &F)
where
    R: Record + Send,
    F: Fn(usize, &mut [R]) + Sync,
{
    if slice.is_empty() {
        return;
    }
    if slice.len() <= grain {
        f(first, slice);
    } else {
        let mid = slice.len() / 2;
        let (lo, hi) = slice.split_at_mut(mid);
        rayon::join(
            || bisect_slice(lo, first, grain, f),
            || bisect_slice(hi, first + mid, grain, f),
        );
    }
}

// Live-prefix bookkeeping shared by the four tile entry points.
fn live_split<const B: usize>(live: usize) -> (usize, usize) {
    let nt = live.div_ceil(B);
    let tail = live - (nt - 1) * B;
    (nt, tail)
}

pub(crate) fn par_tiles_each<R, const B: usize, F>(tiles: &mut [Table<R, B>], live: usize, f: &F)
where
    R: Record,
    R::Columns: Send,
    F: for<'r> Fn(R::RefMut<'r>) + Sync,
{
    if live == 0 {
        return;
    }
    let (nt, tail) = live_split::<B>(live);
    bisect_tiles(&mut tiles[..nt], 0, tail, grain(nt), &|_, n, t: &mut Table<R, B>| {
        for j in 0..n {
            f(t.view_mut(j));
        }
    });
}

pub(crate) fn par_tiles_indexed<R, const B: usize, F>(tiles: &mut [Table<R, B>], live: usize, f: &F)
where
    R: Record,
    R::Columns: Send,
    F: for<'r> Fn(usize, R::RefMut<'r>) + Sync,
{
    if live == 0 {
        return;
    }
    let (nt, tail) = live_split::<B>(live);
    bisect_tiles(&mut tiles[..nt], 0, tail, grain(nt), &|base, n, t: &mut Table<R, B>| {
        for j in 0..n {
            f(base + j, t.view_mut(j));
        }
    });
}

pub(crate) fn par_tiles_range<R, const B: usize, F>(tiles: &mut [Table<R, B>], live: usize, f: &F)
where
    R: Record,
    R::Columns: Send,
    F: for<'t> Fn(usize, usize, &'t mut Table<R, B>) + Sync,
{
    if live == 0 {
        return;
    }
    let (nt, tail) = live_split::<B>(live);
    bisect_tiles(&mut tiles[..nt], 0, tail, grain(nt), &|_, n, t: &mut Table<R, B>| {
        f(0, n, t);
    });
}

pub(crate) fn par_tiles_indexed_range<R, const B: usize, F>(
    tiles: &mut [Table<R, B>],
    live: usize,
    f: &F,
) where
    R: Record,
    R::Columns: Send,
    F: for<'t> Fn(usize, usize, usize, &'t mut Table<R, B>) + Sync,
{
    if live == 0 {
        return;
    }
    let (nt, tail) = live_split::<B>(live);
    bisect_tiles(&mut tiles[..nt], 0, tail, grain(nt), &|base, n, t: &mut Table<R, B>| {
        f(0, n, base, t);
    });
}

pub(crate) fn par_slice_each<R, F>(slice: &mut [R], f: &F)
where
    R: Record + Send,
    F: for<'r> Fn(R::RefMut<'r>) + Sync,
{
    let g = grain(slice.len());
    bisect_slice(slice, 0, g, &|_, chunk: &mut [R]| {
        for r in chunk.iter_mut() {
            f(r.view_mut());
        }
    });
}

pub(crate) fn par_slice_indexed<R, F>(slice: &mut [R], f: &F)
where
    R: Record + Send,
    F: for<'r> Fn(usize, R::RefMut<'r>) + Sync,
{
    let g = grain(slice.len());
    bisect_slice(slice, 0, g, &|first, chunk: &mut [R]| {
        for (k, r) in chunk.iter_mut().enumerate() {
            f(first + k, r.view_mut());
        }
    });
}

pub(crate) fn par_slice_range<R, F>(slice: &mut [R], f: &F)
where
    R: Record + Send,
    F: for<'t> Fn(usize, usize, &'t mut [R]) + Sync,
{
    let g = grain(slice.len());
    bisect_slice(slice, 0, g, &|_, chunk: &mut [R]| {
        let n = chunk.len();
        f(0, n, chunk);
    });
}

pub(crate) fn par_slice_indexed_range<R, F>(slice: &mut [R], f: &F)
where
    R: Record + Send,
    F: for<'t> Fn(usize, usize, usize, &'t mut [R]) + Sync,
{
    let g = grain(slice.len());
    bisect_slice(slice, 0, g, &|first, chunk: &mut [R]| {
        let n = chunk.len();
        f(0, n, first, chunk);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grain_is_clamped() {
        assert_eq!(grain(0), 1);
        assert_eq!(grain(1), 1);
        assert!(grain(usize::MAX / 16) <= 2048);
    }

    #[test]
    fn live_split_accounts_for_the_partial_tile() {
        assert_eq!(live_split::<8>(24), (3, 8));
        assert_eq!(live_split::<8>(25), (4, 1));
        assert_eq!(live_split::<8>(1), (1, 1));
    }
}
