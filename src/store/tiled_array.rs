//! Fixed-length tiled (array-of-structure-of-arrays) collection

use std::fmt;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::store::{Store, Table, TableIter, TileSeq};
use crate::engine::split;

/// `N` records stored as `ceil(N / B)` tiles of `Table<R, B>`.
///
/// Within a tile, each field is a length-`B` column; consecutive tiles
/// follow each other in memory. When `B` does not divide `N` the final
/// tile is only partially live, and every operation here confines itself
/// to the live slots.
pub struct TiledArray<R: Record, const B: usize, const N: usize> {
    tiles: Vec<Table<R, B>>,
}

impl<R: Record, const B: usize, const N: usize> TiledArray<R, B, N> {
    /// Tiles needed to hold `N` records. Fails to compile for `B == 0`.
    pub const TILES: usize = (N + B - 1) / B;

    /// New collection with all `N` slots default-valued.
    pub fn new() -> Self {
        Self {
            tiles: (0..Self::TILES).map(|_| Table::new()).collect(),
        }
    }

    /// New collection with every slot set to `value`.
    pub fn filled(value: R) -> Self {
        let mut a = Self::new();
        a.fill(value);
        a
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
        assert!(pos < N, "position {pos} out of bounds for length {N}");
        self.tiles[pos / B].view(pos % B)
    }

    /// Exclusive view of the record at `pos`. Panics if `pos >= N`.
    #[inline(always)]
    pub fn view_mut(&mut self, pos: usize) -> R::RefMut<'_> {
        assert!(pos < N, "position {pos} out of bounds for length {N}");
        self.tiles[pos / B].view_mut(pos % B)
    }

    /// Checked shared view of the record at `pos`.
    pub fn at(&self, pos: usize) -> Result<R::Ref<'_>> {
        if pos < N {
            Ok(self.tiles[pos / B].view(pos % B))
        } else {
            Err(Error::OutOfBounds { pos, len: N })
        }
    }

    /// Checked exclusive view of the record at `pos`.
    pub fn at_mut(&mut self, pos: usize) -> Result<R::RefMut<'_>> {
        if pos < N {
            Ok(self.tiles[pos / B].view_mut(pos % B))
        } else {
            Err(Error::OutOfBounds { pos, len: N })
        }
    }

    #[inline(always)]
    pub fn read(&self, pos: usize) -> R {
        assert!(pos < N, "position {pos} out of bounds for length {N}");
        self.tiles[pos / B].read(pos % B)
    }

    #[inline(always)]
    pub fn write(&mut self, pos: usize, value: &R) {
        assert!(pos < N, "position {pos} out of bounds for length {N}");
        self.tiles[pos / B].write(pos % B, value);
    }

    pub fn front(&self) -> Option<R::Ref<'_>> {
        (N > 0).then(|| self.view(0))
    }

    pub fn back(&self) -> Option<R::Ref<'_>> {
        (N > 0).then(|| self.view(N - 1))
    }

    /// Write `value` into every live slot. Dead slots of a partial final
    /// tile are left untouched.
    pub fn fill(&mut self, value: R) {
        fill_tiles(&mut self.tiles, N, &value);
    }

    /// Iterate shared views of all live slots in position order.
    pub fn iter(&self) -> TableIter<'_, R, B> {
        TableIter::new(&self.tiles, N)
    }

    /// The underlying tiles.
    pub fn tiles(&self) -> &[Table<R, B>] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Table<R, B>] {
        &mut self.tiles
    }
}

/// Write `value` into the first `live` slots of a tile run, tile by tile
/// so each leaf fill is one contiguous memset-style loop.
pub(crate) fn fill_tiles<R: Record, const B: usize>(
    tiles: &mut [Table<R, B>],
    live: usize,
    value: &R,
) {
    use crate::record::Columns;
    let whole = live / B;
    let rem = live % B;
    for t in &mut tiles[..whole] {
        t.columns_mut().fill_range(0..B, value);
    }
    if rem > 0 {
        tiles[whole].columns_mut().fill_range(0..rem, value);
    }
}

impl<R: Record, const B: usize, const N: usize> Default for TiledArray<R, B, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, const B: usize, const N: usize> Clone for TiledArray<R, B, N>
where
    R::Columns: Clone,
{
    fn clone(&self) -> Self {
        Self {
            tiles: self.tiles.clone(),
        }
    }
}

impl<R: Record, const B: usize, const N: usize> fmt::Debug for TiledArray<R, B, N>
where
    R::Columns: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiledArray")
            .field("len", &N)
            .field("tiles", &self.tiles)
            .finish()
    }
}

impl<R: Record, const B: usize, const N: usize> Store for TiledArray<R, B, N> {
    type Record = R;
    const TILED: bool = true;
    const TILE_SIZE: usize = B;
    type Tile<'t> = &'t mut Table<R, B> where Self: 't;

    #[inline(always)]
    fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    fn tile_count(&self) -> usize {
        Self::TILES
    }

    #[inline(always)]
    fn tile_mut(&mut self, ordinal: usize) -> &mut Table<R, B> {
        &mut self.tiles[ordinal]
    }

    #[inline(always)]
    fn index(&self, pos: usize) -> R::Ref<'_> {
        self.view(pos)
    }

    #[inline(always)]
    fn index_mut(&mut self, pos: usize) -> R::RefMut<'_> {
        self.view_mut(pos)
    }

    fn par_each<F>(&mut self, f: F)
    where
        F: for<'r> Fn(R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_tiles_each(&mut self.tiles, N, &f);
    }

    fn par_indexed<F>(&mut self, f: F)
    where
        F: for<'r> Fn(usize, R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_tiles_indexed(&mut self.tiles, N, &f);
    }

    fn par_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, &'t mut Table<R, B>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_tiles_range(&mut self.tiles, N, &f);
    }

    fn par_indexed_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, usize, &'t mut Table<R, B>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_tiles_indexed_range(&mut self.tiles, N, &f);
    }
}

impl<R: Record, const B: usize, const N: usize> TileSeq<B> for TiledArray<R, B, N> {
    #[inline(always)]
    fn tile_slice(&self) -> &[Table<R, B>] {
        &self.tiles
    }

    #[inline(always)]
    fn tile_slice_mut(&mut self) -> &mut [Table<R, B>] {
        &mut self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        struct Cell {
            v: f64,
        }
    }

    #[test]
    fn tile_count_rounds_up() {
        assert_eq!(TiledArray::<Cell, 16, 100>::TILES, 7);
        assert_eq!(TiledArray::<Cell, 16, 96>::TILES, 6);
        assert_eq!(TiledArray::<Cell, 16, 0>::TILES, 0);
    }

    #[test]
    fn fill_stops_at_the_live_boundary() {
        let mut a: TiledArray<Cell, 16, 100> = TiledArray::new();
        a.fill(Cell { v: 1.0 });
        for pos in 0..100 {
            assert_eq!(a.read(pos), Cell { v: 1.0 });
        }
        // Slots 4..16 of the last tile are past the live length.
        let last = &a.tiles()[6];
        for j in 4..16 {
            assert_eq!(last.read(j), Cell::default());
        }
    }

    #[test]
    fn front_back_and_checked_access() {
        let mut a: TiledArray<Cell, 8, 20> = TiledArray::new();
        a.write(0, &Cell { v: -1.0 });
        a.write(19, &Cell { v: 7.0 });
        assert_eq!(*a.front().unwrap().v, -1.0);
        assert_eq!(*a.back().unwrap().v, 7.0);
        assert_eq!(a.at(20).unwrap_err(), Error::OutOfBounds { pos: 20, len: 20 });
    }
}
