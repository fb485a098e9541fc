//! Fixed-size structure-of-arrays table

use std::fmt;

use crate::record::{Columns, Record};
use crate::store::{Store, TileMut, TileSeq};

/// A structure-of-arrays table with compile-time length `N`.
///
/// Every record field lives in its own length-`N` column, so loops over one
/// field are contiguous and the trip count is a constant the optimizer can
/// see. `Table` is also the tile type of the tiled collections
/// ([`TiledArray`](crate::TiledArray), [`TiledVec`](crate::TiledVec)).
pub struct Table<R: Record, const N: usize> {
    cols: R::Columns,
}

impl<R: Record, const N: usize> Table<R, N> {
    /// New table with all `N` slots default-valued.
    pub fn new() -> Self {
        Self {
            cols: <R::Columns as Columns>::with_len(N),
        }
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Shared view of the record at `pos`. Panics if `pos >= N`.
    #[inline(always)]
    pub fn view(&self, pos: usize) -> R::Ref<'_> {
        self.cols.view(pos)
    }

    /// Exclusive view of the record at `pos`. Panics if `pos >= N`.
    #[inline(always)]
    pub fn view_mut(&mut self, pos: usize) -> R::RefMut<'_> {
        self.cols.view_mut(pos)
    }

    /// Gather the record at `pos` into an owned value.
    #[inline(always)]
    pub fn read(&self, pos: usize) -> R {
        self.cols.read(pos)
    }

    /// Scatter `value` into the columns at `pos`.
    #[inline(always)]
    pub fn write(&mut self, pos: usize, value: &R) {
        self.cols.write(pos, value);
    }

    /// Write `value` into every slot.
    pub fn fill(&mut self, value: R) {
        self.cols.fill(&value);
    }

    /// Direct access to the column image.
    #[inline(always)]
    pub fn columns(&self) -> &R::Columns {
        &self.cols
    }

    /// Mutable access to the column image. Callers must not change column
    /// lengths.
    #[inline(always)]
    pub fn columns_mut(&mut self) -> &mut R::Columns {
        &mut self.cols
    }
}

impl<R: Record, const N: usize> Default for Table<R, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, const N: usize> Clone for Table<R, N>
where
    R::Columns: Clone,
{
    fn clone(&self) -> Self {
        Self {
            cols: self.cols.clone(),
        }
    }
}

impl<R: Record, const N: usize> fmt::Debug for Table<R, N>
where
    R::Columns: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table").field("cols", &self.cols).finish()
    }
}

impl<'s, R: Record, const N: usize> TileMut for &'s mut Table<R, N> {
    type Record = R;

    #[inline(always)]
    fn slot(&self, j: usize) -> R::Ref<'_> {
        self.view(j)
    }

    #[inline(always)]
    fn slot_mut(&mut self, j: usize) -> R::RefMut<'_> {
        self.view_mut(j)
    }
}

impl<R: Record, const N: usize> Store for Table<R, N> {
    type Record = R;
    const TILED: bool = true;
    const TILE_SIZE: usize = N;
    type Tile<'t> = &'t mut Table<R, N> where Self: 't;

    #[inline(always)]
    fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    fn tile_count(&self) -> usize {
        1
    }

    #[inline(always)]
    fn tile_mut(&mut self, ordinal: usize) -> &mut Table<R, N> {
        debug_assert_eq!(ordinal, 0);
        self
    }

    #[inline(always)]
    fn index(&self, pos: usize) -> R::Ref<'_> {
        self.view(pos)
    }

    #[inline(always)]
    fn index_mut(&mut self, pos: usize) -> R::RefMut<'_> {
        self.view_mut(pos)
    }

    // A lone table is a single block; the parallel forms degrade to one
    // sequential pass. Fork-join splitting happens at the tile level in the
    // tiled collections.
    fn par_each<F>(&mut self, f: F)
    where
        F: for<'r> Fn(R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        for j in 0..N {
            f(self.cols.view_mut(j));
        }
    }

    fn par_indexed<F>(&mut self, f: F)
    where
        F: for<'r> Fn(usize, R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        for j in 0..N {
            f(j, self.cols.view_mut(j));
        }
    }

    fn par_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, &'t mut Table<R, N>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        if N > 0 {
            f(0, N, self);
        }
    }

    fn par_indexed_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, usize, &'t mut Table<R, N>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        if N > 0 {
            f(0, N, 0, self);
        }
    }
}

impl<R: Record, const N: usize> TileSeq<N> for Table<R, N> {
    #[inline(always)]
    fn tile_slice(&self) -> &[Table<R, N>] {
        std::slice::from_ref(self)
    }

    #[inline(always)]
    fn tile_slice_mut(&mut self) -> &mut [Table<R, N>] {
        std::slice::from_mut(self)
    }
}
