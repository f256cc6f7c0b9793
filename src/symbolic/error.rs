//! Error types raised by expression construction and arithmetic.

use std::fmt;

/// An error raised synchronously by a construction or arithmetic operation.
///
/// There is no internal recovery or retry anywhere in this crate: every
/// failure propagates to the immediate caller, which should treat it as a
/// programming or input error rather than a transient condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A constructor input could not be understood as a term. Carries the
    /// offending input text.
    InvalidArgument(String),

    /// The divisor's numeric factor is exactly zero while the dividend's is
    /// not.
    DivideByZero,

    /// Both the dividend's and the divisor's numeric factors are zero
    /// (`0 / 0`).
    IndeterminateForm,

    /// The requested operation may be well-defined mathematically, but no
    /// rule for it is implemented yet. Carries a description of the missing
    /// rule.
    UnsupportedOperation(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(input) => write!(f, "cannot interpret `{}` as a term", input),
            Self::DivideByZero => write!(f, "divide by zero"),
            Self::IndeterminateForm => write!(f, "indeterminate form: 0 / 0"),
            Self::UnsupportedOperation(what) => write!(f, "unsupported operation: {}", what),
        }
    }
}

impl std::error::Error for Error {}
