//! Nested record flattening and round-trip properties

use proptest::prelude::*;
use soatable::{indexed_for_each, DynTable, Record, TiledVec};

soatable::record! {
    pub struct Inner {
        pub a: f64,
        pub b: i32,
    }
}

soatable::record! {
    pub struct Mid {
        pub inner: Inner,
        pub c: u8,
    }
}

soatable::record! {
    pub struct Outer {
        pub mid: Mid,
        pub d: i64,
    }
}

#[test]
fn leaf_counts_flatten_structurally() {
    assert_eq!(Inner::LEAF_COUNT, 2);
    assert_eq!(Mid::LEAF_COUNT, 3);
    assert_eq!(Outer::LEAF_COUNT, 4);
}

fn outer() -> impl Strategy<Value = Outer> {
    (-1e9f64..1e9, any::<i32>(), any::<u8>(), any::<i64>()).prop_map(|(a, b, c, d)| Outer {
        mid: Mid {
            inner: Inner { a, b },
            c,
        },
        d,
    })
}

proptest! {
    #[test]
    fn three_level_records_round_trip_through_tiles(vals in prop::collection::vec(outer(), 1..200)) {
        let v: TiledVec<Outer, 8> = vals.iter().copied().collect();
        for (i, expect) in vals.iter().enumerate() {
            prop_assert_eq!(&v.read(i), expect);
        }
    }

    #[test]
    fn three_level_records_round_trip_through_a_monolithic_table(vals in prop::collection::vec(outer(), 1..100)) {
        let mut t: DynTable<Outer> = DynTable::with_len(vals.len());
        for (i, val) in vals.iter().enumerate() {
            t.write(i, val);
        }
        for (i, expect) in vals.iter().enumerate() {
            prop_assert_eq!(&t.read(i), expect);
        }
    }

    #[test]
    fn indexed_traversal_enumerates_every_position(n in 0usize..300) {
        let mut v: TiledVec<Outer, 8> = TiledVec::with_len(n);
        let mut seen = Vec::new();
        indexed_for_each(&mut v, |i, _p| seen.push(i));
        prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn nested_views_write_through_to_leaf_columns(n in 1usize..64, pos_seed in 0usize..64, val in outer()) {
        let pos = pos_seed % n;
        let mut v: TiledVec<Outer, 8> = TiledVec::with_len(n);
        {
            let m = v.view_mut(pos);
            *m.mid.inner.a = val.mid.inner.a;
            *m.mid.inner.b = val.mid.inner.b;
            *m.mid.c = val.mid.c;
            *m.d = val.d;
        }
        prop_assert_eq!(v.read(pos), val);
    }
}
