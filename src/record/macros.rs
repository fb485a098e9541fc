//! The `record!` definition macro

/// Define a logical record and derive its column-wise machinery.
///
/// For `record! { pub struct Point { pub x: f64, pub y: f64 } }` this
/// generates:
///
/// - `Point` itself, with `Clone, Copy, Debug, Default, PartialEq` derived
///   (do not add those derives yourself),
/// - `PointRef<'a>` / `PointMut<'a>`, the shared and exclusive views with
///   one reference per field,
/// - `PointColumns`, the structure-of-arrays image,
/// - [`Record`](crate::Record) and [`Columns`](crate::Columns) impls tying
///   them together.
///
/// Field types may be scalars or other `record!`-defined types; nesting
/// composes to any depth because every field type is itself a `Record`.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ftype:ty ),+ $(,)?
        }
    ) => {
        $crate::__private::paste! {
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq)]
            $vis struct $name {
                $( $(#[$fmeta])* $fvis $field : $ftype, )+
            }

            /// Shared view of one record slot, field by field.
            #[derive(Clone, Copy, Debug)]
            $vis struct [<$name Ref>]<'a> {
                $( $fvis $field : <$ftype as $crate::Record>::Ref<'a>, )+
            }

            /// Exclusive view of one record slot, field by field.
            #[derive(Debug)]
            $vis struct [<$name Mut>]<'a> {
                $( $fvis $field : <$ftype as $crate::Record>::RefMut<'a>, )+
            }

            /// Column-wise storage: one column set per field.
            #[derive(Clone, Debug, Default)]
            $vis struct [<$name Columns>] {
                $( $fvis $field : <$ftype as $crate::Record>::Columns, )+
            }

            impl $crate::Record for $name {
                const LEAF_COUNT: usize = 0 $( + <$ftype as $crate::Record>::LEAF_COUNT )+;
                type Ref<'a> = [<$name Ref>]<'a> where Self: 'a;
                type RefMut<'a> = [<$name Mut>]<'a> where Self: 'a;
                type Columns = [<$name Columns>];

                #[inline(always)]
                fn view(&self) -> [<$name Ref>]<'_> {
                    [<$name Ref>] {
                        $( $field : $crate::Record::view(&self.$field), )+
                    }
                }

                #[inline(always)]
                fn view_mut(&mut self) -> [<$name Mut>]<'_> {
                    [<$name Mut>] {
                        $( $field : $crate::Record::view_mut(&mut self.$field), )+
                    }
                }
            }

            impl $crate::Columns for [<$name Columns>] {
                type Record = $name;

                fn with_len(n: usize) -> Self {
                    Self {
                        $( $field : <<$ftype as $crate::Record>::Columns as $crate::Columns>::with_len(n), )+
                    }
                }

                fn len(&self) -> usize {
                    let lens = [ $( $crate::Columns::len(&self.$field) ),+ ];
                    debug_assert!(lens.iter().all(|&l| l == lens[0]));
                    lens[0]
                }

                #[inline(always)]
                fn view(&self, pos: usize) -> [<$name Ref>]<'_> {
                    [<$name Ref>] {
                        $( $field : $crate::Columns::view(&self.$field, pos), )+
                    }
                }

                #[inline(always)]
                fn view_mut(&mut self, pos: usize) -> [<$name Mut>]<'_> {
                    [<$name Mut>] {
                        $( $field : $crate::Columns::view_mut(&mut self.$field, pos), )+
                    }
                }

                #[inline(always)]
                fn read(&self, pos: usize) -> $name {
                    $name {
                        $( $field : $crate::Columns::read(&self.$field, pos), )+
                    }
                }

                #[inline(always)]
                fn write(&mut self, pos: usize, value: &$name) {
                    $( $crate::Columns::write(&mut self.$field, pos, &value.$field); )+
                }

                fn fill_range(&mut self, span: ::core::ops::Range<usize>, value: &$name) {
                    $( $crate::Columns::fill_range(&mut self.$field, span.clone(), &value.$field); )+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Columns, Record};

    crate::record! {
        struct Point {
            x: f64,
            y: f64,
        }
    }

    crate::record! {
        struct Velocity {
            dx: f64,
            dy: f64,
        }
    }

    crate::record! {
        struct Body {
            pos: Point,
            vel: Velocity,
            mass: f64,
        }
    }

    crate::record! {
        struct System {
            primary: Body,
            secondary: Body,
            age: u32,
        }
    }

    #[test]
    fn leaf_counts_flatten_through_nesting() {
        assert_eq!(Point::LEAF_COUNT, 2);
        assert_eq!(Body::LEAF_COUNT, 5);
        assert_eq!(System::LEAF_COUNT, 11);
    }

    #[test]
    fn views_reach_nested_leaves() {
        let mut b = Body {
            pos: Point { x: 1.0, y: 2.0 },
            vel: Velocity { dx: 0.5, dy: -0.5 },
            mass: 10.0,
        };
        assert_eq!(*b.view().pos.x, 1.0);

        let m = b.view_mut();
        *m.pos.x = 3.0;
        *m.vel.dy = 9.0;
        assert_eq!(b.pos.x, 3.0);
        assert_eq!(b.vel.dy, 9.0);
    }

    #[test]
    fn columns_round_trip_three_levels_deep() {
        let mut cols = <SystemColumns as Columns>::with_len(4);
        assert_eq!(cols.len(), 4);

        let s = System {
            primary: Body {
                pos: Point { x: 1.0, y: 2.0 },
                vel: Velocity { dx: 3.0, dy: 4.0 },
                mass: 5.0,
            },
            secondary: Body {
                pos: Point { x: -1.0, y: -2.0 },
                vel: Velocity { dx: -3.0, dy: -4.0 },
                mass: 6.0,
            },
            age: 77,
        };
        cols.write(2, &s);
        assert_eq!(cols.read(2), s);
        assert_eq!(cols.read(0), System::default());

        // The transposed storage is real: the leaf vector holds the value.
        assert_eq!(cols.primary.pos.x, vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn fill_range_touches_only_the_span() {
        let mut cols = <PointColumns as Columns>::with_len(6);
        cols.fill_range(1..4, &Point { x: 8.0, y: 9.0 });
        assert_eq!(cols.x, vec![0.0, 8.0, 8.0, 8.0, 0.0, 0.0]);
        assert_eq!(cols.y, vec![0.0, 9.0, 9.0, 9.0, 0.0, 0.0]);
    }
}
