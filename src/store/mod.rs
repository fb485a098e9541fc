//! Record containers and the layout-introspection traits
//!
//! Every container here stores the same logical content, records indexed
//! `0..len`, under a different physical layout:
//!
//! - flat array-of-structs: `Vec<R>`, `[R; N]`
//! - one monolithic structure-of-arrays block: [`DynTable`], [`Table`]
//! - tiled (array-of-structure-of-arrays): [`TiledArray`], [`TiledVec`]
//!
//! The [`Store`] trait exposes the layout facts the traversal engine
//! dispatches on. `TILED`/`TILE_SIZE` are associated consts, so the branch
//! between the flat and tiled loop shapes folds away at monomorphization;
//! generic traversal code pays nothing for the abstraction.

use crate::record::Record;

pub mod dynamic;
pub mod fixed;
pub mod flat;
pub mod iter;
pub mod tiled_array;
pub mod tiled_vec;

pub use dynamic::DynTable;
pub use fixed::Table;
pub use iter::TableIter;
pub use tiled_array::TiledArray;
pub use tiled_vec::TiledVec;

/// Slot access within a single tile, uniform across layouts.
///
/// A "tile" is whatever contiguous unit a store traverses in one go: a
/// `Table<R, B>` for tiled stores, the whole table for monolithic ones, the
/// whole element slice for flat ones.
pub trait TileMut {
    type Record: Record;

    /// Shared view of slot `j` within this tile.
    fn slot(&self, j: usize) -> <Self::Record as Record>::Ref<'_>;

    /// Exclusive view of slot `j` within this tile.
    fn slot_mut(&mut self, j: usize) -> <Self::Record as Record>::RefMut<'_>;
}

/// A record container the traversal engine can drive.
///
/// `TILE_SIZE` is `1` for flat stores, the block size `B` for tiled stores,
/// and `usize::MAX` for monolithic tables. The sentinel is chosen so the
/// generic tiled loop (`len / TILE_SIZE` whole tiles, `len % TILE_SIZE`
/// remainder) degrades to a single remainder block for monolithic tables
/// with no special case.
pub trait Store: 'static {
    type Record: Record;

    /// Whether slots are grouped into column-major blocks.
    const TILED: bool;

    /// Slots per tile (see the trait docs for the sentinel values).
    const TILE_SIZE: usize;

    /// Exclusive handle on one tile.
    type Tile<'t>: TileMut<Record = Self::Record>
    where
        Self: 't;

    /// Number of live records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tiles holding live records.
    fn tile_count(&self) -> usize;

    /// Exclusive handle on tile `ordinal`. For flat and monolithic stores
    /// the only valid ordinal is 0.
    fn tile_mut(&mut self, ordinal: usize) -> Self::Tile<'_>;

    /// Shared view of the record at global position `pos`.
    fn index(&self, pos: usize) -> <Self::Record as Record>::Ref<'_>;

    /// Exclusive view of the record at global position `pos`.
    fn index_mut(&mut self, pos: usize) -> <Self::Record as Record>::RefMut<'_>;

    /// Parallel visit of every live slot, unspecified order.
    fn par_each<F>(&mut self, f: F)
    where
        F: for<'r> Fn(<Self::Record as Record>::RefMut<'r>) + Sync,
        Self::Record: Send,
        <Self::Record as Record>::Columns: Send;

    /// Parallel visit with the global position, unspecified order.
    fn par_indexed<F>(&mut self, f: F)
    where
        F: for<'r> Fn(usize, <Self::Record as Record>::RefMut<'r>) + Sync,
        Self::Record: Send,
        <Self::Record as Record>::Columns: Send;

    /// Parallel block visit: `f(start, end, tile)` with live slots
    /// `start..end` of each handed tile.
    fn par_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, Self::Tile<'t>) + Sync,
        Self::Record: Send,
        <Self::Record as Record>::Columns: Send;

    /// Parallel block visit carrying the tile's base position:
    /// `f(start, end, base, tile)` where `base + j` is the global position
    /// of slot `j`.
    fn par_indexed_range<F>(&mut self, f: F)
    where
        F: for<'t> Fn(usize, usize, usize, Self::Tile<'t>) + Sync,
        Self::Record: Send,
        <Self::Record as Record>::Columns: Send;
}

/// Stores whose tiles form one contiguous `[Table<R, B>]` slice.
///
/// The binary parallel traversals require both operands to implement this
/// with the same `B`, which makes "compatibly tiled" a type-level fact
/// instead of a run-time check.
pub trait TileSeq<const B: usize>: Store {
    /// All tiles, live ones first; only `len().div_ceil(B)` of them hold
    /// live records.
    fn tile_slice(&self) -> &[Table<Self::Record, B>];

    fn tile_slice_mut(&mut self) -> &mut [Table<Self::Record, B>];
}

/// Run-time-queryable layout facts for a store type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub tiled: bool,
    pub tile_size: usize,
}

/// The layout of store type `C`.
pub const fn layout_of<C: Store>() -> Layout {
    Layout {
        tiled: C::TILED,
        tile_size: C::TILE_SIZE,
    }
}

/// Whether two store types share tile boundaries, so lock-step traversal
/// can walk them tile by tile instead of element by element.
pub const fn compatibly_tiled<C1: Store, C2: Store>() -> bool {
    C1::TILED && C2::TILED && C1::TILE_SIZE == C2::TILE_SIZE
}
