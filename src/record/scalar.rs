//! Scalar leaves: primitives as single-leaf records
//!
//! Treating each primitive as a one-leaf record is what makes record
//! expansion uniform: a struct field is always "some `Record`", whether it
//! is an `f64` or another nested record, so the macro emits the same code
//! for both.

use std::ops::Range;

use super::{Columns, Record};

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Record for $t {
            const LEAF_COUNT: usize = 1;
            type Ref<'a> = &'a $t where Self: 'a;
            type RefMut<'a> = &'a mut $t where Self: 'a;
            type Columns = Vec<$t>;

            #[inline(always)]
            fn view(&self) -> &$t {
                self
            }

            #[inline(always)]
            fn view_mut(&mut self) -> &mut $t {
                self
            }
        }

        impl Columns for Vec<$t> {
            type Record = $t;

            fn with_len(n: usize) -> Self {
                vec![<$t>::default(); n]
            }

            #[inline(always)]
            fn len(&self) -> usize {
                <[$t]>::len(self)
            }

            #[inline(always)]
            fn view(&self, pos: usize) -> &$t {
                &self[pos]
            }

            #[inline(always)]
            fn view_mut(&mut self, pos: usize) -> &mut $t {
                &mut self[pos]
            }

            #[inline(always)]
            fn read(&self, pos: usize) -> $t {
                self[pos]
            }

            #[inline(always)]
            fn write(&mut self, pos: usize, value: &$t) {
                self[pos] = *value;
            }

            fn fill_range(&mut self, span: Range<usize>, value: &$t) {
                self[span].fill(*value);
            }
        }
    )*};
}

impl_scalar!(f32, f64, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, isize, bool);

#[cfg(test)]
mod tests {
    use crate::{Columns, Record};

    #[test]
    fn scalar_is_a_single_leaf_record() {
        assert_eq!(<f64 as Record>::LEAF_COUNT, 1);
        assert_eq!(<u8 as Record>::LEAF_COUNT, 1);

        let mut x = 3.5f64;
        assert_eq!(*x.view(), 3.5);
        *x.view_mut() = 4.0;
        assert_eq!(x, 4.0);
    }

    #[test]
    fn vec_columns_round_trip() {
        let mut cols = <Vec<i32> as Columns>::with_len(5);
        assert_eq!(cols.len(), 5);
        cols.write(2, &42);
        assert_eq!(cols.read(2), 42);
        cols.fill_range(0..3, &7);
        assert_eq!(cols, vec![7, 7, 7, 0, 0]);
    }
}
