//! Flat array-of-structs stores
//!
//! `Vec<R>` and `[R; N]` participate in the same traversal machinery as
//! the column stores. Their tile is the whole element slice, so the block
//! forms hand callers one contiguous run and the layout-equivalence
//! guarantee holds across all five container kinds.

use crate::engine::split;
use crate::record::Record;
use crate::store::{Store, TileMut};

impl<'s, R: Record> TileMut for &'s mut [R] {
    type Record = R;

    #[inline(always)]
    fn slot(&self, j: usize) -> R::Ref<'_> {
        self[j].view()
    }

    #[inline(always)]
    fn slot_mut(&mut self, j: usize) -> R::RefMut<'_> {
        self[j].view_mut()
    }
}

impl<R: Record> Store for Vec<R> {
    type Record = R;
    const TILED: bool = false;
    const TILE_SIZE: usize = 1;
    type Tile<'t> = &'t mut [R] where Self: 't;

    #[inline(always)]
    fn len(&self) -> usize {
        <[R]>::len(self)
    }

    #[inline(always)]
    fn tile_count(&self) -> usize {
        1
    }

    #[inline(always)]
    fn tile_mut(&mut self, ordinal: usize) -> &mut [R] {
        debug_assert_eq!(ordinal, 0);
        self
    }

    #[inline(always)]
    fn index(&self, pos: usize) -> R::Ref<'_> {
        self[pos].view()
    }

    #[inline(always)]
    fn index_mut(&mut self, pos: usize) -> R::RefMut<'_> {
        self[pos].view_mut()
    }

    fn par_each<F>(&mut self, f: F)
    where
        F: for<'r> Fn(R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_slice_each(self.as_mut_slice(), &f);
    }

    fn par_indexed<F>(&mut self, f: F)
    where
        F: for<'r> Fn(usize, R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_slice_indexed(self.as_mut_slice(), &f);
    }

    fn par_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, &'t mut [R]) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_slice_range(self.as_mut_slice(), &f);
    }

    fn par_indexed_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, usize, &'t mut [R]) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_slice_indexed_range(self.as_mut_slice(), &f);
    }
}

impl<R: Record, const N: usize> Store for [R; N] {
    type Record = R;
    const TILED: bool = false;
    const TILE_SIZE: usize = 1;
    type Tile<'t> = &'t mut [R] where Self: 't;

    #[inline(always)]
    fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    fn tile_count(&self) -> usize {
        1
    }

    #[inline(always)]
    fn tile_mut(&mut self, ordinal: usize) -> &mut [R] {
        debug_assert_eq!(ordinal, 0);
        self
    }

    #[inline(always)]
    fn index(&self, pos: usize) -> R::Ref<'_> {
        self[pos].view()
    }

    #[inline(always)]
    fn index_mut(&mut self, pos: usize) -> R::RefMut<'_> {
        self[pos].view_mut()
    }

    fn par_each<F>(&mut self, f: F)
    where
        F: for<'r> Fn(R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_slice_each(self.as_mut_slice(), &f);
    }

    fn par_indexed<F>(&mut self, f: F)
    where
        F: for<'r> Fn(usize, R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_slice_indexed(self.as_mut_slice(), &f);
    }

    fn par_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, &'t mut [R]) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_slice_range(self.as_mut_slice(), &f);
    }

    fn par_indexed_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, usize, &'t mut [R]) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_slice_indexed_range(self.as_mut_slice(), &f);
    }
}
