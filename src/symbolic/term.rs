//! The atomic factors that make up a [`Scalar`](super::scalar::Scalar).

use crate::primitive::{float, float_from_str};
use rug::Float;
use std::fmt;
use super::error::Error;

/// A single multiplicative factor: a numeric constant, a variable symbol, or
/// an inverted variable symbol.
///
/// The inverse is a structural tag, not a textual spelling. Cancellation
/// between a symbol and its inverse is a tag-plus-name equality check, so
/// whitespace in the input can never affect simplification. The textual
/// spellings of an inverse (`1/x`, `1 / x`, ...) are normalized once, when a
/// term is parsed from text.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A numeric constant, such as `2` or `0.5`.
    Number(Float),

    /// A variable symbol, such as `x` or `y`.
    Symbol(String),

    /// An inverted variable symbol, representing `1/x`.
    Inverse(String),
}

impl Term {
    /// Creates a numeric term.
    pub fn number(n: f64) -> Self {
        Self::Number(float(n))
    }

    /// Creates a symbol term. Fails with [`Error::InvalidArgument`] if
    /// `name` is not a valid symbol name.
    pub fn symbol(name: &str) -> Result<Self, Error> {
        check_symbol_name(name)?;
        Ok(Self::Symbol(name.to_string()))
    }

    /// Creates an inverted symbol term, representing `1/name`.
    pub fn inverse(name: &str) -> Result<Self, Error> {
        check_symbol_name(name)?;
        Ok(Self::Inverse(name.to_string()))
    }

    /// If the term is a [`Term::Number`], returns a reference to the
    /// contained number.
    pub fn as_number(&self) -> Option<&Float> {
        match self {
            Self::Number(num) => Some(num),
            _ => None,
        }
    }

    /// Returns true if the term is a [`Term::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns the multiplicative inverse of this term: a number maps to its
    /// reciprocal, and a symbol swaps its inverse tag.
    ///
    /// Fails with [`Error::DivideByZero`] for the zero number.
    pub fn recip(&self) -> Result<Self, Error> {
        match self {
            Self::Number(num) => {
                if num.is_zero() {
                    Err(Error::DivideByZero)
                } else {
                    Ok(Self::Number(float(num.recip_ref())))
                }
            },
            Self::Symbol(name) => Ok(Self::Inverse(name.clone())),
            Self::Inverse(name) => Ok(Self::Symbol(name.clone())),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num.to_f64()),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Inverse(name) => write!(f, "1/{}", name),
        }
    }
}

impl From<f64> for Term {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl From<i32> for Term {
    fn from(n: i32) -> Self {
        Self::Number(float(n))
    }
}

/// Parses a term from text.
///
/// Fully-numeric text becomes a [`Term::Number`]. Text of the form
/// `1/<symbol>`, tolerating whitespace on either side of the slash, becomes
/// a [`Term::Inverse`]; `1/<number>` folds to the reciprocal immediately
/// (failing with [`Error::DivideByZero`] for `1/0`). Anything else must be a
/// valid symbol name, or the parse fails with [`Error::InvalidArgument`].
impl TryFrom<&str> for Term {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();
        if let Some(num) = float_from_str(trimmed) {
            return Ok(Self::Number(num));
        }

        if let Some(inverted) = strip_inverse_marker(trimmed) {
            return match float_from_str(inverted) {
                Some(num) => Self::Number(num).recip(),
                None => Self::inverse(inverted),
            };
        }

        Self::symbol(trimmed)
    }
}

/// Strips a leading `1/` marker, tolerating whitespace on either side of the
/// slash, and returns the inverted remainder.
fn strip_inverse_marker(s: &str) -> Option<&str> {
    s.strip_prefix('1')
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('/'))
        .map(str::trim_start)
}

/// A symbol name must be non-empty, must not start with a digit, and may
/// contain only alphanumeric characters and underscores.
fn check_symbol_name(name: &str) -> Result<(), Error> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        },
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidArgument(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_number() {
        assert_eq!(Term::try_from("2"), Ok(Term::number(2.0)));
        assert_eq!(Term::try_from(" -3.5 "), Ok(Term::number(-3.5)));
    }

    #[test]
    fn parse_symbol() {
        assert_eq!(Term::try_from("x"), Ok(Term::Symbol("x".to_string())));
        assert_eq!(Term::try_from("dx_1"), Ok(Term::Symbol("dx_1".to_string())));
    }

    #[test]
    fn parse_inverse_spellings() {
        for spelling in ["1/y", "1 /y", "1/ y", "1 / y"] {
            assert_eq!(
                Term::try_from(spelling),
                Ok(Term::Inverse("y".to_string())),
                "spelling: {:?}",
                spelling,
            );
        }
    }

    #[test]
    fn parse_numeric_inverse_folds() {
        assert_eq!(Term::try_from("1/4"), Ok(Term::number(0.25)));
        assert_eq!(Term::try_from("1/0"), Err(Error::DivideByZero));
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for input in ["", "2x", "x+y", "a b", "1/2x"] {
            assert!(
                matches!(Term::try_from(input), Err(Error::InvalidArgument(_))),
                "input: {:?}",
                input,
            );
        }
    }

    #[test]
    fn recip_round_trips_symbols() {
        let symbol = Term::symbol("x").unwrap();
        let inverse = symbol.recip().unwrap();
        assert_eq!(inverse, Term::Inverse("x".to_string()));
        assert_eq!(inverse.recip().unwrap(), symbol);
    }

    #[test]
    fn recip_of_zero_fails() {
        assert_eq!(Term::number(0.0).recip(), Err(Error::DivideByZero));
    }
}
