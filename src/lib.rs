//! soatable: Layout-abstracted record collections and traversal
//!
//! Write element-wise code once, run it over array-of-structs,
//! structure-of-arrays, or tiled (array-of-structure-of-arrays) storage
//! without changing a line. Records are defined with [`record!`]; the
//! containers transpose them into per-field columns; the `for_each` family
//! traverses any layout with loop shapes the optimizer can vectorize.

pub mod engine;
pub mod error;
pub mod record;
pub mod store;

pub use engine::{
    for_each, for_each2, for_each3, for_each_in, for_each_range, for_each_range2,
    for_each_range_in, indexed_for_each, indexed_for_each2, indexed_for_each3,
    indexed_for_each_in, indexed_for_each_range, indexed_for_each_range2, par_for_each,
    par_for_each2, par_for_each_range, par_for_each_range2, par_indexed_for_each,
    par_indexed_for_each2, par_indexed_for_each_range, par_indexed_for_each_range2,
};
pub use error::{Error, Result};
pub use record::{Columns, Record};
pub use store::{
    compatibly_tiled, layout_of, DynTable, Layout, Store, Table, TableIter, TileMut, TileSeq,
    TiledArray, TiledVec,
};

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}

/// API Contract Self-Test
///
/// Local failsafe that catches accidental removal of public surface even
/// without CI: if a container type, trait, or traversal entry point
/// disappears, this module stops compiling.
#[cfg(test)]
mod api_contract_self_test {
    use super::*;

    crate::record! {
        struct Probe {
            x: f64,
            n: i32,
        }
    }

    /// Containers downstream crates depend on must exist and construct.
    #[test]
    fn container_types_api_contract() {
        let _fixed: Table<Probe, 8> = Table::new();
        let _dyn: DynTable<Probe> = DynTable::with_len(3);
        let _arr: TiledArray<Probe, 8, 20> = TiledArray::new();
        let _vec: TiledVec<Probe, 8> = TiledVec::new();
        let _flat: Vec<Probe> = vec![Probe::default(); 3];
    }

    /// Layout introspection must stay queryable.
    #[test]
    fn layout_api_contract() {
        assert!(layout_of::<TiledVec<Probe, 8>>().tiled);
        assert!(!layout_of::<Vec<Probe>>().tiled);
        assert!(compatibly_tiled::<TiledVec<Probe, 8>, TiledArray<Probe, 8, 20>>());
    }

    /// Every traversal entry point must accept its documented callback
    /// shape.
    #[test]
    fn traversal_api_contract() {
        let mut v: TiledVec<Probe, 8> = TiledVec::with_len(10);
        for_each(&mut v, |p| *p.x += 1.0);
        indexed_for_each(&mut v, |i, p| *p.n = i as i32);
        for_each_range(&mut v, |s, e, t: &mut Table<Probe, 8>| {
            for x in &mut t.columns_mut().x[s..e] {
                *x *= 2.0;
            }
        });
        indexed_for_each_range(&mut v, |s, e, base, t: &mut Table<Probe, 8>| {
            for (j, n) in t.columns_mut().n[s..e].iter_mut().enumerate() {
                *n = (base + s + j) as i32;
            }
        });
        par_for_each(&mut v, |p| *p.x += 1.0);

        let mut w: TiledVec<Probe, 8> = TiledVec::with_len(10);
        for_each2(&mut v, &mut w, |a, b| *b.x = *a.x);
        par_for_each2(&mut v, &mut w, |a, b| *b.n = *a.n);
    }

    /// Checked access must keep returning the error type.
    #[test]
    fn error_api_contract() {
        let d: DynTable<Probe> = DynTable::with_len(1);
        assert_eq!(d.at(1).unwrap_err(), Error::OutOfBounds { pos: 1, len: 1 });
    }
}
