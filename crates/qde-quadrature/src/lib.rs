//! # qde-quadrature
//!
//! Double-exponential (DE) quadrature over finite, semi-infinite, and
//! infinite intervals, including integrands with endpoint singularities
//! or discontinuities.
//!
//! A DE transform changes variables so that the transformed integrand
//! decays double-exponentially toward the new limits, which makes the
//! plain trapezoidal rule converge extremely fast. Three canonical
//! transforms cover the interval shapes (tanh-sinh for `[-1, 1]`,
//! exp-sinh for `[0, ∞)`, sinh-sinh for `(-∞, ∞)`), and the
//! [`DeIntegrator`] maps an arbitrary interval onto one of them by
//! substitution. Every call returns the estimate together with a
//! successive-refinement error estimate; convergence is never enforced,
//! the caller checks `E ≤ max(atol, rtol·‖I‖)`.
//!
//! ```
//! use qde_quadrature::integrate;
//!
//! // ∫₀¹ ln x dx = −1, singular at the lower endpoint
//! let (value, error): (f64, f64) = integrate(|x: f64| x.ln(), 0.0, 1.0).unwrap();
//! assert!((value + 1.0).abs() < 1e-9);
//! assert!(error < 1e-6);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Exp-sinh quadrature over `[0, ∞)`.
pub mod expsinh;

/// Interval dispatch, tolerances, and the default engine.
pub mod integrator;

/// Sinh-sinh quadrature over `(-∞, ∞)`.
pub mod sinhsinh;

/// Precomputed per-level weight tables.
pub mod tables;

/// Tanh-sinh quadrature over `[-1, 1]`.
pub mod tanhsinh;

pub use expsinh::ExpSinh;
pub use integrator::{
    default_engine, integrate, integrate_segments, DeIntegrator, Tolerance,
};
pub use sinhsinh::SinhSinh;
pub use tables::WeightTable;
pub use tanhsinh::TanhSinh;
