//! Logical records and their structure-of-arrays column images
//!
//! A [`Record`] is a fixed-shape value type: a struct whose fields are
//! scalars or other records. Its [`Columns`] image stores the same data
//! transposed, one contiguous vector per scalar leaf, so that a loop over
//! one field touches one cache-friendly run of memory.
//!
//! Records are defined with the [`record!`](crate::record!) macro; scalar
//! primitives implement [`Record`] directly, which is what lets nested
//! records expand field by field without special-casing the leaves.

use std::ops::Range;

mod macros;
mod scalar;

/// A fixed-shape logical record that can be stored column-wise.
///
/// Implemented by all scalar primitives and by every struct defined through
/// [`record!`](crate::record!). The shape is fixed at compile time; there is
/// no run-time field discovery.
pub trait Record: Sized + 'static {
    /// Number of scalar leaves after flattening nested records.
    const LEAF_COUNT: usize;

    /// Shared view: the record's shape with `&'a` leaves.
    type Ref<'a>: Copy
    where
        Self: 'a;

    /// Exclusive view: the record's shape with `&'a mut` leaves.
    type RefMut<'a>
    where
        Self: 'a;

    /// The structure-of-arrays image: one `Vec` per scalar leaf.
    type Columns: Columns<Record = Self>;

    /// View an owned (array-of-structs) record through the same view type
    /// the column stores hand out.
    fn view(&self) -> Self::Ref<'_>;

    /// Mutable counterpart of [`view`](Record::view).
    fn view_mut(&mut self) -> Self::RefMut<'_>;
}

/// Column-wise storage for a [`Record`] type.
///
/// All leaf vectors always have the same length. Positions are unchecked
/// here in the sense that they panic like slice indexing; the containers
/// layer adds `Result`-returning accessors where the length is dynamic.
pub trait Columns: Sized {
    type Record: Record<Columns = Self>;

    /// Allocate columns holding `n` default-valued records.
    fn with_len(n: usize) -> Self;

    /// Number of records stored (length of every leaf vector).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared view of the record at `pos`.
    fn view(&self, pos: usize) -> <Self::Record as Record>::Ref<'_>;

    /// Exclusive view of the record at `pos`.
    fn view_mut(&mut self, pos: usize) -> <Self::Record as Record>::RefMut<'_>;

    /// Gather the record at `pos` into an owned value.
    fn read(&self, pos: usize) -> Self::Record;

    /// Scatter `value` into the leaf vectors at `pos`.
    fn write(&mut self, pos: usize, value: &Self::Record);

    /// Write `value` into every position of `span`, leaf vector by leaf
    /// vector. `span` must lie within `0..len()`.
    fn fill_range(&mut self, span: Range<usize>, value: &Self::Record);

    /// Write `value` into every position.
    fn fill(&mut self, value: &Self::Record) {
        self.fill_range(0..self.len(), value);
    }
}
