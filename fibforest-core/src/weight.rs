//! Edge weight abstraction shared by the graph store and the forest builder.
//!
//! Weights must be totally ordered. Floating-point weights use IEEE 754
//! `total_cmp`, so the forest builder can order `f32`/`f64` keys without a
//! wrapper type at the call site. The "zero" and "infinity" sentinels are
//! always supplied by the caller.

use std::cmp::Ordering;

/// A totally ordered, clonable edge weight.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use fibforest_core::Weight;
///
/// assert_eq!(2.0_f64.total_cmp_weight(&3.5), Ordering::Less);
/// assert_eq!(7_u32.total_cmp_weight(&7), Ordering::Equal);
/// ```
pub trait Weight: Clone {
    /// Compares two weights under a total order.
    fn total_cmp_weight(&self, other: &Self) -> Ordering;
}

macro_rules! impl_weight_for_ord {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Weight for $ty {
                #[inline]
                fn total_cmp_weight(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )+
    };
}

macro_rules! impl_weight_for_float {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Weight for $ty {
                #[inline]
                fn total_cmp_weight(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }
            }
        )+
    };
}

impl_weight_for_ord!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_weight_for_float!(f32, f64);

/// Heap key wrapper giving any [`Weight`] an [`Ord`] implementation.
#[derive(Clone, Debug)]
pub(crate) struct WeightKey<W>(pub(crate) W);

impl<W: Weight> PartialEq for WeightKey<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for WeightKey<W> {}

impl<W: Weight> Ord for WeightKey<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp_weight(&other.0)
    }
}

impl<W: Weight> PartialOrd for WeightKey<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
