//! Exp-sinh quadrature over `[0, ∞)`.
//!
//! The transform `x = exp(π/2·sinh t)` is two-sided in `t` although the
//! interval is one-sided in `x`: `t → +∞` drives `x → ∞` and
//! `t → −∞` drives `x → 0⁺`. The kernel therefore keeps two independent
//! branch tables, generated once up to a truncation point `±t_max`
//! beyond which the mapped point or weight leaves the representable
//! range of `T`.

use qde_core::{ensure, DeFloat, IntegrandOutput, Result};

use crate::tables::{generate_levels, sum_one_sided, WeightTable};

/// Exp-sinh (double-exponential) quadrature over the canonical interval
/// `[0, ∞)`.
///
/// Immutable once constructed. The start-index scan performed during
/// integration is local to each call, so a single instance may be
/// invoked concurrently with a reentrant integrand.
#[derive(Debug, Clone)]
pub struct ExpSinh<T> {
    h0: T,
    origin: (T, T),
    t_max: T,
    positive: Vec<WeightTable<T>>,
    negative: Vec<WeightTable<T>>,
}

impl<T: DeFloat> ExpSinh<T> {
    /// Create a kernel with `maxlevel` refinement levels; level `k`
    /// divides the unit `t`-interval into `n0 · 2^k` parts.
    pub fn new(maxlevel: usize, n0: usize) -> Result<Self> {
        ensure!(
            maxlevel >= 1,
            "ExpSinh: maxlevel must be at least 1, got {maxlevel}"
        );
        ensure!(n0 >= 1, "ExpSinh: n0 must be at least 1, got {n0}");
        Ok(Self::build(maxlevel, n0))
    }

    pub(crate) fn build(maxlevel: usize, n0: usize) -> Self {
        let map = |t: T| {
            let x = (T::FRAC_PI_2() * t.sinh()).exp();
            let w = T::FRAC_PI_2() * t.cosh() * x;
            (x, w)
        };
        let reflected = |t: T| map(-t);
        let t_max = truncation_point::<T>();
        let h0 = T::of_usize(2 * n0).recip();
        let positive = generate_levels(maxlevel, h0, Some(t_max), map, |x: T, w: T| {
            !x.is_finite() || !w.is_finite()
        });
        let negative = generate_levels(maxlevel, h0, Some(t_max), reflected, |x: T, w: T| {
            x < T::min_positive_value() || w < T::min_positive_value()
        });
        Self {
            h0,
            origin: map(T::zero()),
            t_max,
            positive,
            negative,
        }
    }

    /// Number of refinement levels.
    pub fn maxlevel(&self) -> usize {
        self.positive.len()
    }

    /// The truncation point `t_max` fixed at construction.
    pub fn truncation(&self) -> T {
        self.t_max
    }

    /// The `t > 0` branch table for `level` (1-based); abscissae tend
    /// to infinity along this branch.
    pub fn positive_table(&self, level: usize) -> Option<&WeightTable<T>> {
        self.positive.get(level.checked_sub(1)?)
    }

    /// The `t < 0` branch table for `level` (1-based); abscissae tend
    /// to `0⁺` along this branch.
    pub fn negative_table(&self, level: usize) -> Option<&WeightTable<T>> {
        self.negative.get(level.checked_sub(1)?)
    }

    /// Integrate `f` over `[0, ∞)`.
    ///
    /// Same return contract as [`TanhSinh::integrate`]. Unlike the
    /// finite-interval kernel there is no minimum-level guard: the
    /// first level is compared against a zero prior.
    ///
    /// [`TanhSinh::integrate`]: crate::tanhsinh::TanhSinh::integrate
    pub fn integrate<Y, F>(&self, f: F, atol: T, rtol: T) -> (Y, T)
    where
        F: Fn(T) -> Y,
        Y: IntegrandOutput<T>,
    {
        let two = T::of_usize(2);
        let (x0, w0) = self.origin;
        let mut acc = f(x0).scale(w0);
        let mut ih = acc.zero_like();
        let mut err = T::zero();
        let mut h = self.h0;
        let mut start_pos = 0usize;
        let mut start_neg = 0usize;
        for level in 0..self.positive.len() {
            let pos = self.positive[level].entries();
            let neg = self.negative[level].entries();
            start_pos = start_index(&f, pos, if level == 0 { 0 } else { 2 * start_pos });
            start_neg = start_index(&f, neg, if level == 0 { 0 } else { 2 * start_neg });
            if let Some(sum) = sum_one_sided(&f, &pos[start_pos..]) {
                acc = acc.add(&sum);
            }
            if let Some(sum) = sum_one_sided(&f, &neg[start_neg..]) {
                acc = acc.add(&sum);
            }
            let next = acc.scale(h);
            err = ih.distance(&next);
            ih = next;
            let tol = atol.max(rtol * ih.norm());
            if !(err > tol) {
                return (ih, err);
            }
            h = h / two;
        }
        (ih, err)
    }
}

/// First index at or after `hint` whose term `w·f(x)` makes a finite,
/// nonzero contribution; `entries.len()` if none does.
///
/// Tables are stored asymptote-first, so the skipped run is the far
/// tail where the product has underflowed. Refinement doubles the index
/// density over a fixed `t`-range, which is why the caller's hint is
/// twice the previous level's start: the scan only trims forward from
/// there and can never drop a contributing term.
fn start_index<T, Y, F>(f: &F, entries: &[(T, T)], hint: usize) -> usize
where
    T: DeFloat,
    Y: IntegrandOutput<T>,
    F: Fn(T) -> Y,
{
    let from = hint.min(entries.len());
    for (i, &(x, w)) in entries.iter().enumerate().skip(from) {
        let n = f(x).scale(w).norm();
        if n.is_finite() && n > T::zero() {
            return i;
        }
    }
    entries.len()
}

/// Largest `t` for which both branches of the transform map to
/// representable values: the growing branch must not overflow and the
/// decaying branch must stay above the smallest positive normal.
fn truncation_point<T: DeFloat>() -> T {
    let representable = |t: T| {
        let u = T::FRAC_PI_2() * t.sinh();
        let x_pos = u.exp();
        let w_pos = T::FRAC_PI_2() * t.cosh() * x_pos;
        let x_neg = (-u).exp();
        let w_neg = T::FRAC_PI_2() * t.cosh() * x_neg;
        x_pos.is_finite()
            && w_pos.is_finite()
            && x_neg >= T::min_positive_value()
            && w_neg >= T::min_positive_value()
    };
    let two = T::of_usize(2);
    let mut lo = T::one();
    let mut hi = two;
    while representable(hi) {
        lo = hi;
        hi = hi * two;
    }
    // bisect down to machine resolution
    for _ in 0..64 {
        let mid = (lo + hi) / two;
        if representable(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}
