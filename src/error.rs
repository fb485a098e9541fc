//! Error type for bounds-checked table access

use thiserror::Error;

/// Errors returned by the checked accessors (`at`, `at_mut`).
///
/// Plain indexing (`view`, `view_mut`, `Index`-style access) panics on
/// misuse instead, the same way slice indexing does. The checked accessors
/// exist for callers that want to handle the out-of-range case.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Position is at or past the live length of the collection.
    #[error("position {pos} out of bounds for table of length {len}")]
    OutOfBounds { pos: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_position_and_length() {
        let e = Error::OutOfBounds { pos: 7, len: 3 };
        assert_eq!(e.to_string(), "position 7 out of bounds for table of length 3");
    }
}
