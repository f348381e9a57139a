//! Error types for the qde workspace.
//!
//! The engine distinguishes exactly two failure classes: programming
//! errors (invalid construction parameters, malformed endpoint lists),
//! which surface immediately as `Err`, and non-convergence, which is not
//! an error at all: the integrators always return their best estimate
//! together with an error estimate the caller checks.

use thiserror::Error;

/// The top-level error type used throughout the qde workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout the qde workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Bail out with `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use qde_core::ensure;
/// fn positive(x: f64) -> qde_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use qde_core::fail;
/// fn always_err() -> qde_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
