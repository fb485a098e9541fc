//! Growable tiled (array-of-structure-of-arrays) collection

use std::fmt;
use std::mem;

use crate::engine::split;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::store::tiled_array::fill_tiles;
use crate::store::{Store, Table, TableIter, TileSeq};

/// A growable collection stored as tiles of `Table<R, B>`.
///
/// The `Vec<R>` of the tiled world: `push`/`pop`/`resize`/`reserve`, with
/// capacity moving in whole-tile units. Slots past `len` in the final tile
/// exist physically but are never observable through this interface.
pub struct TiledVec<R: Record, const B: usize> {
    len: usize,
    tiles: Vec<Table<R, B>>,
}

impl<R: Record, const B: usize> TiledVec<R, B> {
    pub fn new() -> Self {
        assert!(B > 0, "tile size must be nonzero");
        Self {
            len: 0,
            tiles: Vec::new(),
        }
    }

    /// New collection with `n` default-valued records.
    pub fn with_len(n: usize) -> Self {
        let mut v = Self::new();
        v.tiles = (0..n.div_ceil(B)).map(|_| Table::new()).collect();
        v.len = n;
        v
    }

    /// New collection with `n` records all set to `value`.
    pub fn filled(n: usize, value: R) -> Self {
        let mut v = Self::with_len(n);
        v.fill(value);
        v
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slots available without growing: whole tiles times `B`.
    pub fn capacity(&self) -> usize {
        self.tiles.capacity() * B
    }

    /// Ensure capacity for at least `n` records in total.
    pub fn reserve(&mut self, n: usize) {
        let want = n.div_ceil(B);
        if want > self.tiles.len() {
            self.tiles.reserve(want - self.tiles.len());
        }
    }

    /// Drop tiles past the live length and give back spare capacity.
    pub fn shrink_to_fit(&mut self) {
        self.tiles.truncate(self.len.div_ceil(B));
        self.tiles.shrink_to_fit();
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.tiles.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.tiles, &mut other.tiles);
    }

    /// Append a record, growing by one tile when the last is full.
    pub fn push(&mut self, value: R) {
        if self.len == self.tiles.len() * B {
            self.tiles.push(Table::new());
        }
        self.tiles[self.len / B].write(self.len % B, &value);
        self.len += 1;
    }

    /// Remove and return the last record. The vacated tile is kept as
    /// capacity.
    pub fn pop(&mut self) -> Option<R> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.tiles[self.len / B].read(self.len % B))
    }

    /// Resize to `n` records, default-valuing any newly live slots.
    pub fn resize(&mut self, n: usize)
    where
        R: Default,
    {
        self.resize_fill(n, R::default());
    }

    /// Resize to `n` records, writing `value` into any newly live slots.
    ///
    /// Newly live slots are written explicitly even when they sit in a
    /// previously allocated tile, so stale contents from an earlier shrink
    /// can never resurface.
    pub fn resize_fill(&mut self, n: usize, value: R) {
        if n <= self.len {
            self.len = n;
            self.tiles.truncate(n.div_ceil(B));
            return;
        }
        let old = self.len;
        let want = n.div_ceil(B);
        if want > self.tiles.len() {
            self.tiles.resize_with(want, Table::new);
        }
        self.len = n;
        self.fill_span(old, n, &value);
    }

    /// Write `value` into every live slot.
    pub fn fill(&mut self, value: R) {
        fill_tiles(&mut self.tiles, self.len, &value);
    }

    // Tile-wise fill of positions lo..hi (already within bounds).
    fn fill_span(&mut self, lo: usize, hi: usize, value: &R) {
        use crate::record::Columns;
        if lo == hi {
            return;
        }
        let (t0, s0) = (lo / B, lo % B);
        let (t1, s1) = (hi / B, hi % B);
        if t0 == t1 {
            self.tiles[t0].columns_mut().fill_range(s0..s1, value);
            return;
        }
        self.tiles[t0].columns_mut().fill_range(s0..B, value);
        for t in &mut self.tiles[t0 + 1..t1] {
            t.columns_mut().fill_range(0..B, value);
        }
        if s1 > 0 {
            self.tiles[t1].columns_mut().fill_range(0..s1, value);
        }
    }

    /// Shared view of the record at `pos`. Panics if `pos >= len`.
    #[inline(always)]
    pub fn view(&self, pos: usize) -> R::Ref<'_> {
        assert!(
            pos < self.len,
            "position {pos} out of bounds for length {}",
            self.len
        );
        self.tiles[pos / B].view(pos % B)
    }

    /// Exclusive view of the record at `pos`. Panics if `pos >= len`.
    #[inline(always)]
    pub fn view_mut(&mut self, pos: usize) -> R::RefMut<'_> {
        assert!(
            pos < self.len,
            "position {pos} out of bounds for length {}",
            self.len
        );
        self.tiles[pos / B].view_mut(pos % B)
    }

    pub fn get(&self, pos: usize) -> Option<R::Ref<'_>> {
        (pos < self.len).then(|| self.tiles[pos / B].view(pos % B))
    }

    pub fn get_mut(&mut self, pos: usize) -> Option<R::RefMut<'_>> {
        if pos < self.len {
            Some(self.tiles[pos / B].view_mut(pos % B))
        } else {
            None
        }
    }

    /// Checked shared view of the record at `pos`.
    pub fn at(&self, pos: usize) -> Result<R::Ref<'_>> {
        self.get(pos).ok_or(Error::OutOfBounds {
            pos,
            len: self.len,
        })
    }

    /// Checked exclusive view of the record at `pos`.
    pub fn at_mut(&mut self, pos: usize) -> Result<R::RefMut<'_>> {
        let len = self.len;
        self.get_mut(pos).ok_or(Error::OutOfBounds { pos, len })
    }

    #[inline(always)]
    pub fn read(&self, pos: usize) -> R {
        assert!(
            pos < self.len,
            "position {pos} out of bounds for length {}",
            self.len
        );
        self.tiles[pos / B].read(pos % B)
    }

    #[inline(always)]
    pub fn write(&mut self, pos: usize, value: &R) {
        assert!(
            pos < self.len,
            "position {pos} out of bounds for length {}",
            self.len
        );
        self.tiles[pos / B].write(pos % B, value);
    }

    pub fn front(&self) -> Option<R::Ref<'_>> {
        self.get(0)
    }

    pub fn back(&self) -> Option<R::Ref<'_>> {
        if self.len == 0 {
            None
        } else {
            self.get(self.len - 1)
        }
    }

    /// Iterate shared views of all live slots in position order.
    pub fn iter(&self) -> TableIter<'_, R, B> {
        TableIter::new(&self.tiles, self.len)
    }

    pub fn tiles(&self) -> &[Table<R, B>] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Table<R, B>] {
        &mut self.tiles
    }
}

impl<R: Record, const B: usize> Default for TiledVec<R, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, const B: usize> Clone for TiledVec<R, B>
where
    R::Columns: Clone,
{
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            tiles: self.tiles.clone(),
        }
    }
}

impl<R: Record, const B: usize> fmt::Debug for TiledVec<R, B>
where
    R::Columns: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiledVec")
            .field("len", &self.len)
            .field("tiles", &self.tiles)
            .finish()
    }
}

impl<R: Record, const B: usize> FromIterator<R> for TiledVec<R, B> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<R: Record, const B: usize> Extend<R> for TiledVec<R, B> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        let it = iter.into_iter();
        let (lower, _) = it.size_hint();
        self.reserve(self.len + lower);
        for r in it {
            self.push(r);
        }
    }
}

impl<R: Record, const B: usize> Store for TiledVec<R, B> {
    type Record = R;
    const TILED: bool = true;
    const TILE_SIZE: usize = B;
    type Tile<'t> = &'t mut Table<R, B> where Self: 't;

    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    fn tile_count(&self) -> usize {
        self.len.div_ceil(B)
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
        split::par_tiles_each(&mut self.tiles, self.len, &f);
    }

    fn par_indexed<F>(&mut self, f: F)
    where
        F: for<'r> Fn(usize, R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_tiles_indexed(&mut self.tiles, self.len, &f);
    }

    fn par_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, &'t mut Table<R, B>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_tiles_range(&mut self.tiles, self.len, &f);
    }

    fn par_indexed_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, usize, &'t mut Table<R, B>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        split::par_tiles_indexed_range(&mut self.tiles, self.len, &f);
    }
}

impl<R: Record, const B: usize> TileSeq<B> for TiledVec<R, B> {
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
        struct Item {
            v: i64,
        }
    }

    fn item(v: i64) -> Item {
        Item { v }
    }

    #[test]
    fn push_pop_across_tile_boundaries() {
        let mut v: TiledVec<Item, 4> = TiledVec::new();
        for i in 0..10 {
            v.push(item(i));
        }
        assert_eq!(v.len(), 10);
        assert_eq!(v.tiles().len(), 3);
        for i in (0..10).rev() {
            assert_eq!(v.pop(), Some(item(i)));
        }
        assert_eq!(v.pop(), None);
        // Vacated tiles stay allocated as capacity.
        assert_eq!(v.tiles().len(), 3);
        assert!(v.capacity() >= 12);
    }

    #[test]
    fn resize_grows_with_explicit_values() {
        let mut v: TiledVec<Item, 4> = TiledVec::with_len(3);
        v.resize_fill(10, item(5));
        assert_eq!(v.len(), 10);
        assert_eq!(v.read(2), item(0));
        for i in 3..10 {
            assert_eq!(v.read(i), item(5));
        }
    }

    #[test]
    fn resize_shrink_then_grow_does_not_resurface_stale_slots() {
        let mut v: TiledVec<Item, 4> = TiledVec::new();
        for i in 0..6 {
            v.push(item(i + 100));
        }
        v.resize_fill(2, item(0));
        assert_eq!(v.len(), 2);
        v.resize(6);
        for i in 2..6 {
            assert_eq!(v.read(i), item(0));
        }
    }

    #[test]
    fn reserve_and_shrink_move_in_tile_units() {
        let mut v: TiledVec<Item, 8> = TiledVec::new();
        v.reserve(20);
        assert!(v.capacity() >= 24);
        v.push(item(1));
        v.shrink_to_fit();
        assert_eq!(v.len(), 1);
        assert_eq!(v.read(0), item(1));
    }

    #[test]
    fn from_iterator_and_extend() {
        let mut v: TiledVec<Item, 4> = (0..7).map(item).collect();
        assert_eq!(v.len(), 7);
        v.extend((7..9).map(item));
        for i in 0..9 {
            assert_eq!(v.read(i as usize), item(i));
        }
        assert_eq!(*v.back().unwrap().v, 8);
    }

    #[test]
    fn checked_access_respects_live_length_not_capacity() {
        let mut v: TiledVec<Item, 4> = TiledVec::with_len(5);
        // Tile 1 has slots 5..8 allocated but dead.
        assert!(v.at(4).is_ok());
        assert_eq!(v.at(5).unwrap_err(), Error::OutOfBounds { pos: 5, len: 5 });
        assert!(v.get_mut(5).is_none());
    }

    #[test]
    fn fill_covers_the_partial_final_tile() {
        let mut v: TiledVec<Item, 16> = TiledVec::with_len(100);
        v.fill(item(3));
        for i in 0..100 {
            assert_eq!(v.read(i), item(3));
        }
        // Dead slots of the last tile stay default.
        assert_eq!(v.tiles()[6].read(10), item(0));
    }
}
