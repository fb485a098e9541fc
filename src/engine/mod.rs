//! Generic traversal over any record store
//!
//! Four calling conventions, each sequential and parallel:
//!
//! - element: `for_each` hands the callback one exclusive view per slot
//! - indexed element: `indexed_for_each` adds the global position
//! - block: `for_each_range` hands `f(start, end, tile)` so the callback
//!   can run its own tight loop over contiguous columns
//! - indexed block: `indexed_for_each_range` adds the tile's base position
//!
//! The loop shape is decided by the first operand's layout consts, so the
//! flat/tiled branch is resolved at monomorphization and the remainder
//! tile, when the tile size does not divide the length, gets its own
//! shortened pass. Multi-operand forms take equal lengths as a checked
//! precondition and walk tile-paired when layouts match, element-paired
//! otherwise.

mod for_each;
mod for_each_range;
mod indexed_for_each;
mod indexed_for_each_range;
mod parallel;
pub(crate) mod split;

pub use for_each::{for_each, for_each2, for_each3, for_each_in};
pub use for_each_range::{for_each_range, for_each_range2, for_each_range_in};
pub use indexed_for_each::{indexed_for_each, indexed_for_each2, indexed_for_each3, indexed_for_each_in};
pub use indexed_for_each_range::{indexed_for_each_range, indexed_for_each_range2};
pub use parallel::{
    par_for_each, par_for_each2, par_for_each_range, par_for_each_range2, par_indexed_for_each,
    par_indexed_for_each2, par_indexed_for_each_range, par_indexed_for_each_range2,
};
