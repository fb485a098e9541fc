//! Heap-backed structure-of-arrays table with run-time length

use std::fmt;

use crate::error::{Error, Result};
use crate::record::{Columns, Record};
use crate::store::{Store, TileMut};

/// A structure-of-arrays table sized at run time.
///
/// One monolithic block: every record field is a single contiguous column
/// of length `len`. For traversal purposes the whole table is one tile
/// (`TILE_SIZE` is the `usize::MAX` sentinel), which keeps the generic
/// tiled loop shape valid without a dedicated code path.
pub struct DynTable<R: Record> {
    cols: R::Columns,
    len: usize,
}

impl<R: Record> DynTable<R> {
    pub fn new() -> Self {
        Self::with_len(0)
    }

    /// Table with `n` default-valued records.
    pub fn with_len(n: usize) -> Self {
        Self {
            cols: <R::Columns as Columns>::with_len(n),
            len: n,
        }
    }

    /// Replace the storage with `n` fresh default-valued records. Previous
    /// contents are discarded.
    pub fn allocate(&mut self, n: usize) {
        self.cols = <R::Columns as Columns>::with_len(n);
        self.len = n;
    }

    /// Drop the storage, leaving an empty table.
    pub fn deallocate(&mut self) {
        self.allocate(0);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Shared view of the record at `pos`. Panics if out of bounds.
    #[inline(always)]
    pub fn view(&self, pos: usize) -> R::Ref<'_> {
        self.cols.view(pos)
    }

    /// Exclusive view of the record at `pos`. Panics if out of bounds.
    #[inline(always)]
    pub fn view_mut(&mut self, pos: usize) -> R::RefMut<'_> {
        self.cols.view_mut(pos)
    }

    /// Checked shared view of the record at `pos`.
    pub fn at(&self, pos: usize) -> Result<R::Ref<'_>> {
        if pos < self.len {
            Ok(self.cols.view(pos))
        } else {
            Err(Error::OutOfBounds { pos, len: self.len })
        }
    }

    /// Checked exclusive view of the record at `pos`.
    pub fn at_mut(&mut self, pos: usize) -> Result<R::RefMut<'_>> {
        if pos < self.len {
            Ok(self.cols.view_mut(pos))
        } else {
            Err(Error::OutOfBounds { pos, len: self.len })
        }
    }

    #[inline(always)]
    pub fn read(&self, pos: usize) -> R {
        self.cols.read(pos)
    }

    #[inline(always)]
    pub fn write(&mut self, pos: usize, value: &R) {
        self.cols.write(pos, value);
    }

    /// Write `value` into every live slot.
    pub fn fill(&mut self, value: R) {
        self.cols.fill(&value);
    }

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

impl<R: Record> Default for DynTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Clone for DynTable<R>
where
    R::Columns: Clone,
{
    fn clone(&self) -> Self {
        Self {
            cols: self.cols.clone(),
            len: self.len,
        }
    }
}

impl<R: Record> fmt::Debug for DynTable<R>
where
    R::Columns: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynTable")
            .field("len", &self.len)
            .field("cols", &self.cols)
            .finish()
    }
}

impl<'s, R: Record> TileMut for &'s mut DynTable<R> {
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

impl<R: Record> Store for DynTable<R> {
    type Record = R;
    const TILED: bool = true;
    // Sentinel: len / TILE_SIZE == 0 and len % TILE_SIZE == len for any
    // real length, so the generic loop sees one remainder-sized block.
    const TILE_SIZE: usize = usize::MAX;
    type Tile<'t> = &'t mut DynTable<R> where Self: 't;

    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    fn tile_count(&self) -> usize {
        1
    }

    #[inline(always)]
    fn tile_mut(&mut self, ordinal: usize) -> &mut DynTable<R> {
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

    // One monolithic block, so the parallel forms run it sequentially.
    fn par_each<F>(&mut self, f: F)
    where
        F: for<'r> Fn(R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        for j in 0..self.len {
            f(self.cols.view_mut(j));
        }
    }

    fn par_indexed<F>(&mut self, f: F)
    where
        F: for<'r> Fn(usize, R::RefMut<'r>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        for j in 0..self.len {
            f(j, self.cols.view_mut(j));
        }
    }

    fn par_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, &'t mut DynTable<R>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        let n = self.len;
        if n > 0 {
            f(0, n, self);
        }
    }

    fn par_indexed_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, usize, &'t mut DynTable<R>) + Sync,
        R: Send,
        R::Columns: Send,
    {
        let n = self.len;
        if n > 0 {
            f(0, n, 0, self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        struct Sample {
            v: f64,
            tag: u32,
        }
    }

    #[test]
    fn allocate_and_deallocate() {
        let mut t: DynTable<Sample> = DynTable::new();
        assert!(t.is_empty());
        t.allocate(10);
        assert_eq!(t.len(), 10);
        assert_eq!(t.read(9), Sample::default());
        t.deallocate();
        assert!(t.is_empty());
    }

    #[test]
    fn allocate_discards_previous_contents() {
        let mut t: DynTable<Sample> = DynTable::with_len(4);
        t.write(0, &Sample { v: 1.0, tag: 1 });
        t.allocate(4);
        assert_eq!(t.read(0), Sample::default());
    }

    #[test]
    fn checked_access() {
        let mut t: DynTable<Sample> = DynTable::with_len(3);
        assert!(t.at(2).is_ok());
        assert_eq!(t.at(3).unwrap_err(), Error::OutOfBounds { pos: 3, len: 3 });
        *t.at_mut(1).unwrap().v = 5.0;
        assert_eq!(*t.view(1).v, 5.0);
    }
}
