//! Integrand output shapes.
//!
//! An integrand may return a bare scalar or a fixed-shape container of
//! scalars; the integral estimate has the same shape, and the error
//! estimate is a scalar norm. [`IntegrandOutput`] captures the algebra
//! the refinement loop needs: addition, scaling by the step size, a
//! Euclidean norm, and a zero of matching shape for degenerate
//! intervals. A single generic impl over `nalgebra::OVector` covers both
//! statically and dynamically sized vectors.

use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, OVector, Scalar};

use crate::float::DeFloat;

/// A value an integrand may return.
///
/// The shape of `self` (scalar, vector length) must be the same for
/// every evaluation within one integration call.
pub trait IntegrandOutput<T: DeFloat>: Clone {
    /// Additive identity with the same shape as `self`.
    fn zero_like(&self) -> Self;

    /// `self * k`.
    fn scale(&self, k: T) -> Self;

    /// `self + rhs`.
    fn add(&self, rhs: &Self) -> Self;

    /// Euclidean norm, used by the convergence test.
    fn norm(&self) -> T;

    /// `‖self − rhs‖`, the successive-refinement error estimate.
    fn distance(&self, rhs: &Self) -> T;
}

macro_rules! impl_scalar_output {
    ($($t:ty),*) => {$(
        impl IntegrandOutput<$t> for $t {
            #[inline]
            fn zero_like(&self) -> Self {
                0.0
            }

            #[inline]
            fn scale(&self, k: $t) -> Self {
                self * k
            }

            #[inline]
            fn add(&self, rhs: &Self) -> Self {
                self + rhs
            }

            #[inline]
            fn norm(&self) -> $t {
                self.abs()
            }

            #[inline]
            fn distance(&self, rhs: &Self) -> $t {
                (self - rhs).abs()
            }
        }
    )*};
}

impl_scalar_output!(f32, f64);

impl<T, D> IntegrandOutput<T> for OVector<T, D>
where
    T: DeFloat + Scalar,
    D: Dim,
    DefaultAllocator: Allocator<D>,
{
    fn zero_like(&self) -> Self {
        self.map(|_| T::zero())
    }

    fn scale(&self, k: T) -> Self {
        self.map(|v| v * k)
    }

    fn add(&self, rhs: &Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }

    fn norm(&self) -> T {
        self.iter().fold(T::zero(), |acc, v| acc + *v * *v).sqrt()
    }

    fn distance(&self, rhs: &Self) -> T {
        self.zip_fold(rhs, T::zero(), |acc, a, b| {
            let d = a - b;
            acc + d * d
        })
        .sqrt()
    }
}

/// Sum `terms` with a balanced binary tree instead of left-to-right
/// accumulation, keeping rounding-error growth logarithmic in the table
/// length. Returns `None` for an empty slice.
pub fn pairwise_sum<T, Y>(terms: &[Y]) -> Option<Y>
where
    T: DeFloat,
    Y: IntegrandOutput<T>,
{
    match terms {
        [] => None,
        [only] => Some(only.clone()),
        _ => {
            let (lo, hi) = terms.split_at(terms.len() / 2);
            let left = pairwise_sum(lo)?;
            let right = pairwise_sum(hi)?;
            Some(left.add(&right))
        }
    }
}
