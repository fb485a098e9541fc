//! Parallel forms: exactly-once visits and equivalence with the
//! sequential family

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use approx::assert_relative_eq;
use soatable::{
    for_each, indexed_for_each, par_for_each, par_for_each2, par_for_each_range,
    par_for_each_range2, par_indexed_for_each, par_indexed_for_each2,
    par_indexed_for_each_range, par_indexed_for_each_range2, DynTable, Table, TiledArray,
    TiledVec,
};

soatable::record! {
    pub struct P {
        pub x: f64,
        pub n: i64,
    }
}

const N: usize = 5_000;

fn tiled(n: usize) -> TiledVec<P, 16> {
    let mut v: TiledVec<P, 16> = TiledVec::with_len(n);
    indexed_for_each(&mut v, |i, p| {
        *p.n = i as i64;
        *p.x = i as f64;
    });
    v
}

#[test]
fn par_each_visits_every_slot_exactly_once() {
    let mut v = tiled(N);
    let count = AtomicUsize::new(0);
    let sum = AtomicI64::new(0);
    par_for_each(&mut v, |p| {
        count.fetch_add(1, Ordering::Relaxed);
        sum.fetch_add(*p.n, Ordering::Relaxed);
    });
    assert_eq!(count.into_inner(), N);
    assert_eq!(sum.into_inner(), (N as i64 - 1) * N as i64 / 2);
}

#[test]
fn par_disjoint_writes_match_sequential() {
    let mut par = tiled(N);
    let mut seq = tiled(N);
    par_indexed_for_each(&mut par, |i, p| *p.n = (i as i64) * 3 - 7);
    indexed_for_each(&mut seq, |i, p| *p.n = (i as i64) * 3 - 7);
    for i in 0..N {
        assert_eq!(par.read(i), seq.read(i));
    }
}

#[test]
fn par_on_flat_store_matches_sequential() {
    let mut v = vec![P::default(); N];
    par_indexed_for_each(&mut v, |i, p| *p.n = i as i64 + 1);
    for (i, p) in v.iter().enumerate() {
        assert_eq!(p.n, i as i64 + 1);
    }
}

#[test]
fn par_on_monolithic_table_runs_its_single_block() {
    let mut d: DynTable<P> = DynTable::with_len(100);
    par_indexed_for_each(&mut d, |i, p| *p.n = i as i64);
    for i in 0..100 {
        assert_eq!(d.read(i).n, i as i64);
    }
}

#[test]
fn par_range_covers_whole_tiles_and_the_remainder() {
    let mut v = tiled(N + 5);
    par_indexed_for_each_range(&mut v, |s, e, base, t: &mut Table<P, 16>| {
        for j in s..e {
            *t.view_mut(j).n = (base + j) as i64 * 2;
        }
    });
    for i in 0..N + 5 {
        assert_eq!(v.read(i).n, i as i64 * 2);
    }
}

#[test]
fn par_range_block_widths_are_tile_shaped() {
    let mut v = tiled(37);
    let widths = Mutex::new(Vec::new());
    par_for_each_range(&mut v, |s, e, _t: &mut Table<P, 16>| {
        widths.lock().unwrap().push(e - s);
    });
    let mut widths = widths.into_inner().unwrap();
    widths.sort_unstable();
    assert_eq!(widths, vec![5, 16, 16]);
}

#[test]
fn par_float_reduction_agrees_with_sequential() {
    let mut v = tiled(N);
    let mut seq_sum = 0.0;
    for_each(&mut v, |p| seq_sum += *p.x * 0.25);
    let par_sum = Mutex::new(0.0f64);
    par_for_each(&mut v, |p| *par_sum.lock().unwrap() += *p.x * 0.25);
    assert_relative_eq!(par_sum.into_inner().unwrap(), seq_sum, max_relative = 1e-12);
}

#[test]
fn par_lock_step_pairs_matching_slots() {
    let mut a = tiled(1000);
    let mut b: TiledArray<P, 16, 1000> = TiledArray::new();
    par_for_each2(&mut a, &mut b, |pa, pb| *pb.n = *pa.n + 100);
    for i in 0..1000 {
        assert_eq!(b.read(i).n, i as i64 + 100);
    }
}

#[test]
fn par_paired_indexed_and_block_forms_agree() {
    let mut a = tiled(500);

    let mut b: TiledVec<P, 16> = TiledVec::with_len(500);
    par_indexed_for_each2(&mut a, &mut b, |i, pa, pb| *pb.n = *pa.n + i as i64);
    for i in 0..500 {
        assert_eq!(b.read(i).n, 2 * i as i64);
    }

    let mut c: TiledVec<P, 16> = TiledVec::with_len(500);
    par_indexed_for_each_range2(
        &mut a,
        &mut c,
        |s, e, base, ta: &mut Table<P, 16>, tc: &mut Table<P, 16>| {
            for j in s..e {
                *tc.view_mut(j).n = *ta.view(j).n + (base + j) as i64;
            }
        },
    );
    for i in 0..500 {
        assert_eq!(c.read(i).n, 2 * i as i64);
    }

    let mut d: TiledVec<P, 16> = TiledVec::with_len(500);
    par_for_each_range2(
        &mut a,
        &mut d,
        |s, e, ta: &mut Table<P, 16>, td: &mut Table<P, 16>| {
            for j in s..e {
                *td.view_mut(j).n = *ta.view(j).n;
            }
        },
    );
    for i in 0..500 {
        assert_eq!(d.read(i).n, i as i64);
    }
}

#[test]
#[should_panic(expected = "equal collection lengths")]
fn par_lock_step_length_mismatch_panics() {
    let mut a: TiledVec<P, 16> = TiledVec::with_len(10);
    let mut b: TiledVec<P, 16> = TiledVec::with_len(11);
    par_for_each2(&mut a, &mut b, |_pa, _pb| {});
}

#[test]
fn par_on_empty_collections_is_a_no_op() {
    let mut v: TiledVec<P, 16> = TiledVec::new();
    par_for_each(&mut v, |_p| panic!("callback on empty collection"));
    let mut flat: Vec<P> = Vec::new();
    par_for_each(&mut flat, |_p| panic!("callback on empty collection"));
}
