//! # qde-core
//!
//! Foundational building blocks for the qde workspace: the error
//! hierarchy with its `ensure!` / `fail!` macros, the [`DeFloat`]
//! precision trait, and the [`IntegrandOutput`] value-shape trait shared
//! by all quadrature kernels.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// The floating-point precision trait.
pub mod float;

/// Integrand output shapes and pairwise summation.
pub mod value;

pub use errors::{Error, Result};
pub use float::DeFloat;
pub use value::{pairwise_sum, IntegrandOutput};
