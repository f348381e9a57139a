//! Precision abstraction.
//!
//! Every table, kernel, and estimate is generic over a floating-point
//! type `T`; the same refinement algorithm must stay numerically sound
//! from ~7 significant digits (`f32`) upward. The bound is kept small on
//! purpose: `num-traits` supplies the arithmetic and the transcendental
//! functions, and [`DeFloat`] only adds the exact small-integer
//! conversion the table generators need.

use std::fmt::Debug;
use std::ops::AddAssign;

use num_traits::{Float, FloatConst};

/// Floating-point precision the quadrature engine is generic over.
///
/// Implemented for `f32` and `f64`. A wrapper around an
/// arbitrary-precision float may implement this trait externally as long
/// as its `Float`/`FloatConst` impls are faithful; nothing in the engine
/// assumes a fixed mantissa width.
pub trait DeFloat: Float + FloatConst + AddAssign + Debug + Send + Sync + 'static {
    /// Exact conversion from a small sample count or divisor.
    fn of_usize(n: usize) -> Self;
}

impl DeFloat for f32 {
    #[inline]
    fn of_usize(n: usize) -> Self {
        n as f32
    }
}

impl DeFloat for f64 {
    #[inline]
    fn of_usize(n: usize) -> Self {
        n as f64
    }
}
