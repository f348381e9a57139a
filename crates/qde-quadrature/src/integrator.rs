//! Interval classification and the user-facing entry points.
//!
//! The engine owns one instance of each canonical kernel and reduces an
//! arbitrary interval to one of them by variable substitution: a shift
//! or reflection for semi-infinite intervals, an affine map for finite
//! ones. Multi-segment calls split the interval at caller-provided
//! interior points so singularities and discontinuities can be isolated
//! at segment boundaries.

use std::sync::LazyLock;

use qde_core::{ensure, DeFloat, IntegrandOutput, Result};

use crate::expsinh::ExpSinh;
use crate::sinhsinh::SinhSinh;
use crate::tanhsinh::TanhSinh;

/// Absolute/relative tolerance pair for the convergence test
/// `E ≤ max(atol, rtol·‖I‖)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<T> {
    /// Absolute tolerance, defined on the unscaled result.
    pub atol: T,
    /// Relative tolerance; scale-invariant.
    pub rtol: T,
}

impl<T: DeFloat> Tolerance<T> {
    /// Explicit absolute and relative tolerances; both must be
    /// non-negative.
    pub fn new(atol: T, rtol: T) -> Result<Self> {
        ensure!(
            atol >= T::zero(),
            "Tolerance: atol must be non-negative, got {atol:?}"
        );
        ensure!(
            rtol >= T::zero(),
            "Tolerance: rtol must be non-negative, got {rtol:?}"
        );
        Ok(Self { atol, rtol })
    }

    /// Absolute tolerance only; the relative tolerance is zero.
    pub fn absolute(atol: T) -> Result<Self> {
        Self::new(atol, T::zero())
    }
}

impl<T: DeFloat> Default for Tolerance<T> {
    /// `atol = 0` and `rtol = √ε` for the precision in use.
    fn default() -> Self {
        Self {
            atol: T::zero(),
            rtol: T::epsilon().sqrt(),
        }
    }
}

/// Double-exponential quadrature over an arbitrary interval.
///
/// Owns one [`TanhSinh`], one [`ExpSinh`], and one [`SinhSinh`] kernel,
/// all built at construction; the engine itself holds no mutable state,
/// so a single instance may be shared across threads as long as the
/// integrand is reentrant.
#[derive(Debug, Clone)]
pub struct DeIntegrator<T: DeFloat> {
    ts: TanhSinh<T>,
    es: ExpSinh<T>,
    ss: SinhSinh<T>,
}

impl<T: DeFloat> DeIntegrator<T> {
    /// Engine with the default parameters: `maxlevel = 12`,
    /// `h0 = 1/8` for the finite-interval kernel, `n0 = 7` for the
    /// infinite-interval kernels.
    pub fn new() -> Self {
        Self {
            ts: TanhSinh::build(12, T::of_usize(8).recip()),
            es: ExpSinh::build(12, 7),
            ss: SinhSinh::build(12, 7),
        }
    }

    /// Engine with explicit parameters.
    ///
    /// Fails fast with `Error::Precondition` if `maxlevel < 2` (the
    /// finite-interval kernel needs a prior estimate to compare
    /// against), `h0` is not positive and finite, or `n0 == 0`.
    pub fn with_params(maxlevel: usize, h0: T, n0: usize) -> Result<Self> {
        Ok(Self {
            ts: TanhSinh::new(maxlevel, h0)?,
            es: ExpSinh::new(maxlevel, n0)?,
            ss: SinhSinh::new(maxlevel, n0)?,
        })
    }

    /// Integrate `f` over `[a, b]` with the default tolerance
    /// (`atol = 0`, `rtol = √ε`). Either endpoint may be infinite.
    pub fn integrate<Y, F>(&self, f: F, a: T, b: T) -> Result<(Y, T)>
    where
        F: Fn(T) -> Y,
        Y: IntegrandOutput<T>,
    {
        self.integrate_with(f, &[a, b], Tolerance::default())
    }

    /// Integrate `f` over consecutive segments
    /// `[e₀, e₁], [e₁, e₂], …` and sum both the estimates and the
    /// error estimates.
    ///
    /// At least two endpoints are required and none may be NaN; any may
    /// be `±∞`. The absolute tolerance is divided evenly among the
    /// segments, the relative tolerance applies to each segment as is.
    /// Placing interior endpoints at known singularities or
    /// discontinuities lets each segment converge at double-exponential
    /// speed again.
    ///
    /// Convergence is not enforced: check
    /// `E ≤ max(atol, rtol·‖I‖)` on the returned pair.
    pub fn integrate_with<Y, F>(&self, f: F, endpoints: &[T], tol: Tolerance<T>) -> Result<(Y, T)>
    where
        F: Fn(T) -> Y,
        Y: IntegrandOutput<T>,
    {
        ensure!(
            endpoints.len() >= 2,
            "DeIntegrator: at least two endpoints are required, got {}",
            endpoints.len()
        );
        ensure!(
            endpoints.iter().all(|e| !e.is_nan()),
            "DeIntegrator: endpoints must not be NaN"
        );
        let segments = endpoints.len() - 1;
        let atol = tol.atol / T::of_usize(segments);
        let (mut total, mut err) = self.segment(&f, endpoints[0], endpoints[1], atol, tol.rtol);
        for pair in endpoints[1..].windows(2) {
            let (i, e) = self.segment(&f, pair[0], pair[1], atol, tol.rtol);
            total = total.add(&i);
            err += e;
        }
        Ok((total, err))
    }

    /// Classify one oriented segment and delegate to the matching
    /// kernel.
    fn segment<Y, F>(&self, f: &F, a: T, b: T, atol: T, rtol: T) -> (Y, T)
    where
        F: Fn(T) -> Y,
        Y: IntegrandOutput<T>,
    {
        if a > b {
            let (i, e) = self.segment(f, b, a, atol, rtol);
            return (i.scale(-T::one()), e);
        }
        if a == b {
            return (f(a).zero_like(), T::zero());
        }
        let inf = T::infinity();
        if a == -inf && b == inf {
            self.ss.integrate(f, atol, rtol)
        } else if b == inf {
            if a == T::zero() {
                self.es.integrate(f, atol, rtol)
            } else {
                self.es.integrate(|u| f(u + a), atol, rtol)
            }
        } else if a == -inf {
            if b == T::zero() {
                self.es.integrate(|u| f(-u), atol, rtol)
            } else {
                self.es.integrate(|u| f(b - u), atol, rtol)
            }
        } else if a == -T::one() && b == T::one() {
            self.ts.integrate(f, atol, rtol)
        } else {
            let half = T::of_usize(2).recip();
            let mid = (a + b) * half;
            let scale = (b - a) * half;
            // atol is defined on the unscaled result
            let (i, e) = self
                .ts
                .integrate(|u| f(mid + scale * u), atol / scale, rtol);
            (i.scale(scale), e * scale)
        }
    }
}

impl<T: DeFloat> Default for DeIntegrator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide `f64` engine, built lazily on first use. It owns no
/// external resources and needs no teardown.
static DEFAULT_ENGINE: LazyLock<DeIntegrator<f64>> = LazyLock::new(DeIntegrator::new);

/// The process-wide default `f64` engine.
pub fn default_engine() -> &'static DeIntegrator<f64> {
    &DEFAULT_ENGINE
}

/// Integrate `f` over `[a, b]` with the default `f64` engine and
/// tolerance. Either endpoint may be infinite.
///
/// ```
/// use qde_quadrature::integrate;
///
/// // ∫₀^∞ e⁻ˣ dx = 1
/// let (value, error): (f64, f64) = integrate(|x: f64| (-x).exp(), 0.0, f64::INFINITY).unwrap();
/// assert!((value - 1.0).abs() < 1e-8);
/// assert!(error >= 0.0);
/// ```
pub fn integrate<Y, F>(f: F, a: f64, b: f64) -> Result<(Y, f64)>
where
    F: Fn(f64) -> Y,
    Y: IntegrandOutput<f64>,
{
    default_engine().integrate(f, a, b)
}

/// Multi-segment form of [`integrate`] with an explicit tolerance.
pub fn integrate_segments<Y, F>(f: F, endpoints: &[f64], tol: Tolerance<f64>) -> Result<(Y, f64)>
where
    F: Fn(f64) -> Y,
    Y: IntegrandOutput<f64>,
{
    default_engine().integrate_with(f, endpoints, tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;
    use qde_core::Error;
    use std::f64::consts::PI;

    fn engine() -> DeIntegrator<f64> {
        DeIntegrator::new()
    }

    #[test]
    fn runge_function_on_the_canonical_interval() {
        let q = engine();
        let (i, e): (f64, f64) = q.integrate(|x| 2.0 / (1.0 + x * x), -1.0, 1.0).unwrap();
        assert_relative_eq!(i, PI, epsilon = 1e-12);
        assert!(e <= f64::EPSILON.sqrt() * i);
    }

    #[test]
    fn exponential_over_the_half_line() {
        let q = engine();
        let (i, _): (f64, f64) = q.integrate(|x| (-x).exp(), 0.0, f64::INFINITY).unwrap();
        assert!((i - 1.0).abs() < 1e-10, "got {i}");
    }

    #[test]
    fn gaussian_over_the_real_line() {
        let q = engine();
        let (i, _): (f64, f64) = q
            .integrate(|x| (-x * x).exp(), f64::NEG_INFINITY, f64::INFINITY)
            .unwrap();
        assert!((i - PI.sqrt()).abs() < 1e-10, "got {i}");
    }

    #[test]
    fn inverse_sqrt_singularity_at_zero() {
        let q = engine();
        // ∫₀¹ x^(-1/2) dx = 2
        let (i, _): (f64, f64) = q.integrate(|x| 1.0 / x.sqrt(), 0.0, 1.0).unwrap();
        assert!((i - 2.0).abs() < 1e-10, "got {i}");
    }

    #[test]
    fn logarithmic_singularity_at_zero() {
        let q = engine();
        // ∫₀¹ ln x dx = −1
        let (i, _): (f64, f64) = q.integrate(|x| x.ln(), 0.0, 1.0).unwrap();
        assert!((i + 1.0).abs() < 1e-10, "got {i}");
    }

    #[test]
    fn vector_valued_integrand() {
        let q = engine();
        let (i, e): (Vector2<f64>, f64) = q
            .integrate(
                |x| Vector2::new(1.0 / (1.0 + x * x), 2.0 / (1.0 + x * x)),
                -1.0,
                1.0,
            )
            .unwrap();
        assert!((i[0] - PI / 2.0).abs() < 1e-12);
        assert!((i[1] - PI).abs() < 1e-12);
        assert!(e >= 0.0 && e <= f64::EPSILON.sqrt() * i.norm());
    }

    #[test]
    fn shifted_half_line() {
        let q = engine();
        // ∫₁^∞ x⁻² dx = 1
        let (i, _): (f64, f64) = q.integrate(|x| 1.0 / (x * x), 1.0, f64::INFINITY).unwrap();
        assert!((i - 1.0).abs() < 1e-8, "got {i}");
    }

    #[test]
    fn reflected_half_lines() {
        let q = engine();
        // ∫₋∞⁰ eˣ dx = 1, hits the b == 0 fast path
        let (i, _): (f64, f64) = q.integrate(|x| x.exp(), f64::NEG_INFINITY, 0.0).unwrap();
        assert!((i - 1.0).abs() < 1e-10, "got {i}");
        // ∫₋∞³ e^(x−3) dx = 1, reflection around b = 3
        let (i, _): (f64, f64) = q
            .integrate(|x| (x - 3.0).exp(), f64::NEG_INFINITY, 3.0)
            .unwrap();
        assert!((i - 1.0).abs() < 1e-10, "got {i}");
    }

    #[test]
    fn antisymmetry_is_exact() {
        let q = engine();
        let f = |x: f64| (-x).exp();
        let (i1, e1): (f64, f64) = q.integrate(f, 0.0, 2.0).unwrap();
        let (i2, e2): (f64, f64) = q.integrate(f, 2.0, 0.0).unwrap();
        assert_eq!(i1, -i2);
        assert_eq!(e1, e2);
        // orientation also flips across infinite intervals
        let (i3, _): (f64, f64) = q.integrate(f, f64::INFINITY, 0.0).unwrap();
        assert!((i3 + 1.0).abs() < 1e-10);
    }

    #[test]
    fn degenerate_interval_is_zero() {
        let q = engine();
        let (i, e): (f64, f64) = q.integrate(|x| x.exp(), 1.5, 1.5).unwrap();
        assert_eq!(i, 0.0);
        assert_eq!(e, 0.0);
        let (v, e): (Vector2<f64>, f64) = q
            .integrate(|x| Vector2::new(x, x * x), 2.0, 2.0)
            .unwrap();
        assert_eq!(v, Vector2::new(0.0, 0.0));
        assert_eq!(e, 0.0);
    }

    #[test]
    fn segments_add_up() {
        let q = engine();
        let f = |x: f64| (-x).exp();
        let (whole, _): (f64, f64) = q.integrate(f, 0.0, 2.0).unwrap();
        let (left, _): (f64, f64) = q.integrate(f, 0.0, 1.0).unwrap();
        let (right, _): (f64, f64) = q.integrate(f, 1.0, 2.0).unwrap();
        assert_relative_eq!(whole, left + right, max_relative = 1e-12);
        let (split, _): (f64, f64) = q
            .integrate_with(f, &[0.0, 1.0, 2.0], Tolerance::default())
            .unwrap();
        assert_relative_eq!(whole, split, max_relative = 1e-12);
    }

    #[test]
    fn interior_singularity_isolated_by_splitting() {
        let q = engine();
        // ∫₋₁¹ |x|^(-1/2) dx = 4, singular at the interior point 0
        let (i, _): (f64, f64) = q
            .integrate_with(|x: f64| x.abs().sqrt().recip(), &[-1.0, 0.0, 1.0], Tolerance::default())
            .unwrap();
        assert!((i - 4.0).abs() < 1e-9, "got {i}");
    }

    #[test]
    fn absolute_tolerance_is_rescaled_with_the_interval() {
        let q = engine();
        let tol = Tolerance::absolute(1e-6).unwrap();
        let (i, e): (f64, f64) = q
            .integrate_with(|x: f64| (-x).exp(), &[0.0, 10.0], tol)
            .unwrap();
        let expected = 1.0 - (-10.0f64).exp();
        assert!((i - expected).abs() < 1e-6, "got {i}");
        assert!(e <= 1e-6);
    }

    #[test]
    fn precision_scaling() {
        let q32 = DeIntegrator::<f32>::new();
        let (i32v, e32): (f32, f32) = q32.integrate(|x| 2.0 / (1.0 + x * x), -1.0, 1.0).unwrap();
        assert!((i32v - std::f32::consts::PI).abs() < 5e-3, "got {i32v}");
        assert!(e32 <= f32::EPSILON.sqrt() * i32v);

        let (i64v, _): (f64, f64) = engine().integrate(|x| 2.0 / (1.0 + x * x), -1.0, 1.0).unwrap();
        let dev32 = (f64::from(i32v) - PI).abs();
        let dev64 = (i64v - PI).abs();
        assert!(dev64 < dev32);
    }

    #[test]
    fn rejects_malformed_endpoint_lists() {
        let q = engine();
        let one = q.integrate_with(|x: f64| x, &[0.0], Tolerance::default());
        assert!(matches!(one, Err(Error::Precondition(_))));
        let nan = q.integrate_with(|x: f64| x, &[0.0, f64::NAN], Tolerance::default());
        assert!(matches!(nan, Err(Error::Precondition(_))));
    }

    #[test]
    fn rejects_bad_construction_and_tolerances() {
        assert!(DeIntegrator::<f64>::with_params(0, 0.125, 7).is_err());
        assert!(DeIntegrator::<f64>::with_params(1, 0.125, 7).is_err());
        assert!(DeIntegrator::<f64>::with_params(12, -0.125, 7).is_err());
        assert!(DeIntegrator::<f64>::with_params(12, 0.125, 0).is_err());
        assert!(Tolerance::new(-1.0, 0.0).is_err());
        assert!(Tolerance::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn default_tolerance_values() {
        let tol = Tolerance::<f64>::default();
        assert_eq!(tol.atol, 0.0);
        assert_eq!(tol.rtol, f64::EPSILON.sqrt());
    }

    #[test]
    fn default_engine_is_shared() {
        assert!(std::ptr::eq(default_engine(), default_engine()));
        let (i, _): (f64, f64) = integrate(|x: f64| x, 0.0, 1.0).unwrap();
        assert!((i - 0.5).abs() < 1e-12);
    }
}
