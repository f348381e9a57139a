//! # qde
//!
//! Double-exponential (tanh-sinh) quadrature for proper and improper
//! integrals.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `qde-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! qde = "0.1"
//! ```
//!
//! ```rust
//! use qde::quadrature::integrate;
//!
//! // ∫₋∞^∞ e^(−x²) dx = √π
//! let (value, error): (f64, f64) =
//!     integrate(|x: f64| (-x * x).exp(), f64::NEG_INFINITY, f64::INFINITY).unwrap();
//! assert!((value - std::f64::consts::PI.sqrt()).abs() < 1e-8);
//! assert!(error >= 0.0);
//! ```
//!
//! The returned pair is `(estimate, error estimate)`; convergence is
//! not enforced, so callers verify `error ≤ max(atol, rtol·‖I‖)`
//! themselves.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types, the precision trait, and integrand value shapes.
pub use qde_core as core;

/// The quadrature kernels, interval dispatcher, and entry points.
pub use qde_quadrature as quadrature;
