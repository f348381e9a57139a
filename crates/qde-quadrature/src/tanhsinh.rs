//! Tanh-sinh quadrature over `[-1, 1]`.
//!
//! The transform `x = tanh(π/2·sinh t)` maps `[-1, 1]` onto the real
//! line; its derivative decays double-exponentially, so the plain
//! trapezoidal rule on a uniform `t`-grid converges rapidly even when
//! the integrand is singular or discontinuous at either endpoint. The
//! table cutoffs keep every stored abscissa strictly inside `(-1, 1)`,
//! so endpoint singularities are never evaluated.

use qde_core::{ensure, DeFloat, IntegrandOutput, Result};

use crate::tables::{generate_levels, sum_symmetric, WeightTable};

/// Tanh-sinh (double-exponential) quadrature over the canonical
/// interval `[-1, 1]`.
///
/// Immutable once constructed; a single instance may be reused across
/// any number of integration calls, concurrently if the integrand is
/// reentrant.
#[derive(Debug, Clone)]
pub struct TanhSinh<T> {
    h0: T,
    origin: (T, T),
    tables: Vec<WeightTable<T>>,
}

impl<T: DeFloat> TanhSinh<T> {
    /// Create a kernel with `maxlevel` refinement levels and base step
    /// `h0` (level `k` uses step `h0 / 2^(k-1)`).
    ///
    /// At least two levels are required: the error estimate compares
    /// successive estimates, so a single level could only ever report a
    /// meaningless zero error.
    pub fn new(maxlevel: usize, h0: T) -> Result<Self> {
        ensure!(
            maxlevel >= 2,
            "TanhSinh: maxlevel must be at least 2, got {maxlevel}"
        );
        ensure!(
            h0 > T::zero() && h0.is_finite(),
            "TanhSinh: h0 must be positive and finite, got {h0:?}"
        );
        Ok(Self::build(maxlevel, h0))
    }

    pub(crate) fn build(maxlevel: usize, h0: T) -> Self {
        let map = |t: T| {
            let u = T::FRAC_PI_2() * t.sinh();
            let x = u.tanh();
            let w = T::FRAC_PI_2() * t.cosh() / (u.cosh() * u.cosh());
            (x, w)
        };
        // stop once x is within one epsilon of 1 or the weight underflows
        let stop = |x: T, w: T| T::one() - x <= T::epsilon() || w < T::min_positive_value();
        let tables = generate_levels(maxlevel, h0, None, map, stop);
        Self {
            h0,
            origin: map(T::zero()),
            tables,
        }
    }

    /// Number of refinement levels.
    pub fn maxlevel(&self) -> usize {
        self.tables.len()
    }

    /// The precomputed table for `level` (1-based).
    pub fn table(&self, level: usize) -> Option<&WeightTable<T>> {
        self.tables.get(level.checked_sub(1)?)
    }

    /// Integrate `f` over `[-1, 1]`.
    ///
    /// Returns the estimate and the successive-refinement error
    /// estimate `‖Ih_prev − Ih‖`. Convergence against
    /// `max(atol, rtol·‖I‖)` is *not* enforced: after `maxlevel` levels
    /// the last estimate is returned regardless, and the caller checks
    /// the error.
    pub fn integrate<Y, F>(&self, f: F, atol: T, rtol: T) -> (Y, T)
    where
        F: Fn(T) -> Y,
        Y: IntegrandOutput<T>,
    {
        let two = T::of_usize(2);
        let (x0, w0) = self.origin;
        let mut acc = f(x0).scale(w0);
        let mut h = self.h0;
        let mut ih = acc.scale(h);
        let mut err = T::zero();
        for (level, table) in self.tables.iter().enumerate() {
            if let Some(sum) = sum_symmetric(&f, table.entries()) {
                acc = acc.add(&sum);
            }
            let next = acc.scale(h);
            // the first level provides no prior estimate to compare against
            if level > 0 {
                err = ih.distance(&next);
                let tol = atol.max(rtol * next.norm());
                // a NaN estimate also stops refining
                if !(err > tol) {
                    return (next, err);
                }
            }
            ih = next;
            h = h / two;
        }
        (ih, err)
    }
}
