//! Position iterator over a run of tiles

use std::cmp::Ordering;

use crate::record::Record;
use crate::store::Table;

/// Iterator over the live slots of a tile run, yielding shared views.
///
/// A position is a `(tile, slot)` pair; the one-past-the-end position is
/// normalized to `(n / B, n % B)` so that equality-based termination works
/// for every length, including zero. Beyond `Iterator`, it supports random
/// access arithmetic: [`offset`](TableIter::offset) moves by a signed
/// element count (wrapping through tile boundaries in either direction)
/// and [`distance`](TableIter::distance) measures signed element
/// separation. Ordering is lexicographic on `(tile, slot)`.
pub struct TableIter<'a, R: Record, const B: usize> {
    tiles: &'a [Table<R, B>],
    tile: usize,
    slot: usize,
    end_tile: usize,
    end_slot: usize,
}

impl<'a, R: Record, const B: usize> TableIter<'a, R, B> {
    /// Iterator over the first `live` slots of `tiles`, starting at the
    /// beginning.
    pub fn new(tiles: &'a [Table<R, B>], live: usize) -> Self {
        debug_assert!(live.div_ceil(B) <= tiles.len());
        Self {
            tiles,
            tile: 0,
            slot: 0,
            end_tile: live / B,
            end_slot: live % B,
        }
    }

    /// Element position from the start of the run.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.tile * B + self.slot
    }

    /// This iterator moved by `n` elements, negative `n` moving backwards.
    /// Panics if the target lies outside `0..=live`.
    pub fn offset(&self, n: isize) -> Self {
        let here = self.position() as isize;
        let end = (self.end_tile * B + self.end_slot) as isize;
        let target = here + n;
        assert!(
            (0..=end).contains(&target),
            "offset {n} from position {here} leaves the live range 0..={end}"
        );
        let target = target as usize;
        Self {
            tiles: self.tiles,
            tile: target / B,
            slot: target % B,
            end_tile: self.end_tile,
            end_slot: self.end_slot,
        }
    }

    /// Signed element distance `self - other`.
    pub fn distance(&self, other: &Self) -> isize {
        (self.tile as isize - other.tile as isize) * B as isize + self.slot as isize
            - other.slot as isize
    }

    fn remaining(&self) -> usize {
        self.end_tile * B + self.end_slot - self.position()
    }
}

impl<'a, R: Record, const B: usize> Iterator for TableIter<'a, R, B> {
    type Item = R::Ref<'a>;

    fn next(&mut self) -> Option<R::Ref<'a>> {
        if self.tile == self.end_tile && self.slot == self.end_slot {
            return None;
        }
        let tiles = self.tiles;
        let item = tiles[self.tile].view(self.slot);
        self.slot += 1;
        if self.slot == B {
            self.slot = 0;
            self.tile += 1;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<R: Record, const B: usize> ExactSizeIterator for TableIter<'_, R, B> {}

// Derives would drag the tile contents into comparisons and demand R
// bounds; position state is all that identity means here.
impl<R: Record, const B: usize> std::fmt::Debug for TableIter<'_, R, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableIter")
            .field("tile", &self.tile)
            .field("slot", &self.slot)
            .field("end_tile", &self.end_tile)
            .field("end_slot", &self.end_slot)
            .finish()
    }
}

impl<R: Record, const B: usize> Clone for TableIter<'_, R, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record, const B: usize> Copy for TableIter<'_, R, B> {}

impl<R: Record, const B: usize> PartialEq for TableIter<'_, R, B> {
    fn eq(&self, other: &Self) -> bool {
        self.tile == other.tile && self.slot == other.slot
    }
}

impl<R: Record, const B: usize> Eq for TableIter<'_, R, B> {}

impl<R: Record, const B: usize> PartialOrd for TableIter<'_, R, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: Record, const B: usize> Ord for TableIter<'_, R, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.tile, self.slot).cmp(&(other.tile, other.slot))
    }
}

#[cfg(test)]
mod tests {
    use crate::TiledVec;

    crate::record! {
        struct Cell {
            v: i32,
        }
    }

    fn sample(n: i32) -> TiledVec<Cell, 4> {
        (0..n).map(|v| Cell { v }).collect()
    }

    #[test]
    fn yields_every_live_slot_in_order() {
        let v = sample(10);
        let seen: Vec<i32> = v.iter().map(|c| *c.v).collect();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn empty_run_yields_nothing() {
        let v = sample(0);
        assert_eq!(v.iter().count(), 0);
    }

    #[test]
    fn exact_length_at_tile_multiples_and_remainders() {
        for n in [0, 1, 3, 4, 5, 8, 11] {
            assert_eq!(sample(n).iter().len(), n as usize);
        }
    }

    #[test]
    fn offset_wraps_through_tile_boundaries() {
        let v = sample(10);
        let it = v.iter();
        let fifth = it.offset(5);
        assert_eq!(fifth.position(), 5);
        // Backwards across a tile boundary: 5 -> 2.
        let second = fifth.offset(-3);
        assert_eq!(second.position(), 2);
        assert_eq!(*second.clone().next().unwrap().v, 2);
    }

    #[test]
    fn distance_and_ordering() {
        let v = sample(9);
        let a = v.iter().offset(2);
        let b = v.iter().offset(7);
        assert_eq!(b.distance(&a), 5);
        assert_eq!(a.distance(&b), -5);
        assert!(a < b);
        assert_eq!(a, v.iter().offset(2));
    }

    #[test]
    #[should_panic]
    fn offset_before_the_start_panics() {
        let v = sample(5);
        let _ = v.iter().offset(-1);
    }
}
