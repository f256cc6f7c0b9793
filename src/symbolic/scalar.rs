//! A canonical product of [`Term`]s — the coefficient carried by every
//! expression node.

use crate::consts::{ONE, ZERO};
use crate::primitive::float;
use rug::Float;
use std::fmt;
use std::ops::Mul;
use super::error::Error;
use super::term::Term;

/// The sign of a scalar's numeric factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

/// A loosely-typed constructor input for [`Scalar::try_new`]: a raw number,
/// raw text, or an already-built [`Term`].
#[derive(Debug, Clone)]
pub enum Factor<'a> {
    Number(f64),
    Text(&'a str),
    Term(Term),
}

impl From<f64> for Factor<'_> {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Factor<'_> {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl<'a> From<&'a str> for Factor<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl From<Term> for Factor<'_> {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl TryFrom<Factor<'_>> for Term {
    type Error = Error;

    fn try_from(factor: Factor<'_>) -> Result<Self, Error> {
        match factor {
            Factor::Number(n) => Ok(Term::number(n)),
            Factor::Text(s) => Term::try_from(s),
            Factor::Term(term) => Ok(term),
        }
    }
}

/// An ordered product of [`Term`]s, kept in canonical form.
///
/// Canonical form means: exactly one [`Term::Number`], positioned first,
/// equal to the product of every numeric factor supplied so far; no symbol
/// appears together with its own inverse (they annihilate on contact); and a
/// numeric factor of exactly zero absorbs everything, leaving `[0]`.
///
/// Every constructor and operation re-canonicalizes before the value is
/// exposed, so a `Scalar` observed from outside this module always holds
/// these invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    factors: Vec<Term>,
}

impl Scalar {
    /// The unit scalar `[1]`.
    pub fn one() -> Self {
        Self { factors: vec![Term::Number(ONE.clone())] }
    }

    /// The canonical zero scalar `[0]`.
    pub fn zero() -> Self {
        Self { factors: vec![Term::Number(ZERO.clone())] }
    }

    /// Creates a scalar holding the single numeric factor `n`.
    pub fn number(n: f64) -> Self {
        Self { factors: vec![Term::number(n)] }
    }

    /// Builds a scalar from a sequence of loosely-typed factors, normalizing
    /// raw numbers and text into [`Term`]s before canonicalizing.
    ///
    /// Fails with [`Error::InvalidArgument`] on text that is neither numeric
    /// nor a valid (possibly inverted) symbol, and with
    /// [`Error::DivideByZero`] on the textual reciprocal `1/0`.
    pub fn try_new<'a, I, F>(factors: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = F>,
        F: Into<Factor<'a>>,
    {
        let terms = factors.into_iter()
            .map(|factor| Term::try_from(factor.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_terms(terms))
    }

    /// Builds a scalar directly from terms and canonicalizes it.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        Self { factors: canonicalize(terms) }
    }

    /// The canonical factor list. The first factor is always the numeric
    /// one.
    pub fn factors(&self) -> &[Term] {
        &self.factors
    }

    /// The numeric factor.
    pub fn numeric(&self) -> &Float {
        match &self.factors[0] {
            Term::Number(num) => num,
            // canonicalize always places the accumulator first
            _ => unreachable!("canonical scalar must lead with its numeric factor"),
        }
    }

    /// Returns true if this is the canonical zero scalar.
    pub fn is_zero(&self) -> bool {
        self.numeric().is_zero()
    }

    /// Returns true if this is the unit scalar with no symbol factors.
    pub fn is_one(&self) -> bool {
        self.factors.len() == 1 && *self.numeric() == *ONE
    }

    /// The sign of the numeric factor.
    pub fn sign(&self) -> Sign {
        let num = self.numeric();
        if num.is_zero() {
            Sign::Zero
        } else if num.is_sign_negative() {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    /// Returns this scalar with its numeric factor negated.
    pub fn negate(&self) -> Self {
        let mut factors = self.factors.clone();
        if let Term::Number(num) = &mut factors[0] {
            *num *= -1;
        }
        Self { factors }
    }

    /// Returns the multiplicative inverse of this scalar: every numeric
    /// factor becomes its reciprocal and every symbol factor swaps its
    /// inverse tag. The input is left unmodified.
    ///
    /// Fails with [`Error::DivideByZero`] for the zero scalar.
    pub fn invert(&self) -> Result<Self, Error> {
        let inverted = self.factors.iter()
            .map(Term::recip)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_terms(inverted))
    }

    /// Divides this scalar by `other`.
    ///
    /// A zero divisor with a nonzero dividend fails with
    /// [`Error::DivideByZero`]; `0 / 0` fails with
    /// [`Error::IndeterminateForm`]; a zero dividend with a nonzero divisor
    /// is the zero scalar. The numeric factors divide directly, so dividing
    /// a scalar by itself yields exactly 1.
    pub fn divide(&self, other: &Scalar) -> Result<Self, Error> {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Err(Error::IndeterminateForm),
            (false, true) => Err(Error::DivideByZero),
            (true, false) => Ok(Self::zero()),
            (false, false) => {
                let mut terms = vec![Term::Number(float(self.numeric() / other.numeric()))];
                terms.extend(self.factors[1..].iter().cloned());
                for term in &other.factors[1..] {
                    terms.push(term.recip()?);
                }
                Ok(Self::from_terms(terms))
            },
        }
    }
}

/// The single canonicalization pass: numeric factors multiply into an
/// accumulator starting at 1, and a symbol annihilates an already-collected
/// inverse of the same name (and vice versa). Survivors keep first-seen
/// order behind the accumulator; a zero accumulator absorbs everything.
fn canonicalize<I>(terms: I) -> Vec<Term>
where
    I: IntoIterator<Item = Term>,
{
    let mut acc = float(1);
    let mut survivors: Vec<Term> = Vec::new();

    for term in terms {
        match term {
            Term::Number(num) => acc *= num,
            Term::Symbol(name) => {
                let cancelled = survivors.iter()
                    .position(|t| matches!(t, Term::Inverse(other) if *other == name));
                match cancelled {
                    Some(idx) => { survivors.remove(idx); },
                    None => survivors.push(Term::Symbol(name)),
                }
            },
            Term::Inverse(name) => {
                let cancelled = survivors.iter()
                    .position(|t| matches!(t, Term::Symbol(other) if *other == name));
                match cancelled {
                    Some(idx) => { survivors.remove(idx); },
                    None => survivors.push(Term::Inverse(name)),
                }
            },
        }
    }

    if acc.is_zero() {
        return vec![Term::Number(acc)];
    }

    let mut factors = Vec::with_capacity(survivors.len() + 1);
    factors.push(Term::Number(acc));
    factors.extend(survivors);
    factors
}

/// Multiplies two scalars by concatenating their factor lists and
/// re-canonicalizing. A zero factor on either side absorbs the result into
/// the canonical zero scalar.
impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar::from_terms(self.factors.into_iter().chain(rhs.factors))
    }
}

/// Multiplies this scalar by a single extra term.
impl Mul<Term> for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Term) -> Scalar {
        Scalar::from_terms(self.factors.into_iter().chain([rhs]))
    }
}

impl From<Term> for Scalar {
    fn from(term: Term) -> Self {
        Self::from_terms([term])
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

/// Renders the canonical factor list. A purely numeric scalar renders as the
/// bare number; otherwise each symbol factor is parenthesized behind the
/// numeric factor, which is omitted when it is exactly 1.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.len() == 1 {
            return write!(f, "{}", self.numeric().to_f64());
        }

        if *self.numeric() != *ONE {
            write!(f, "{}", self.numeric().to_f64())?;
        }
        for term in &self.factors[1..] {
            write!(f, "({})", term)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use pretty_assertions::assert_eq;
    use rand::seq::SliceRandom;
    use super::*;

    #[test]
    fn numbers_fold_into_one_leading_factor() {
        let scalar = Scalar::try_new([
            Factor::from(2),
            Factor::from("y"),
            Factor::from(3),
        ]).unwrap();

        assert_eq!(scalar.to_string(), "6(y)");
        assert_eq!(scalar.factors().len(), 2);
        assert_float_absolute_eq!(scalar.numeric().to_f64(), 6.0);
    }

    #[test]
    fn numeric_fold_is_order_independent() {
        let mut factors = vec![
            Factor::from(2),
            Factor::from("y"),
            Factor::from(3),
            Factor::from(0.5),
        ];

        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            factors.shuffle(&mut rng);
            let scalar = Scalar::try_new(factors.clone()).unwrap();
            assert_float_absolute_eq!(scalar.numeric().to_f64(), 3.0);
            assert_eq!(scalar.factors()[1..], [Term::Symbol("y".to_string())]);
        }
    }

    #[test]
    fn symbol_cancels_its_inverse() {
        let scalar = Scalar::try_new(["s", "1/s"]).unwrap();
        assert_eq!(scalar.to_string(), "1");
        assert_eq!(scalar.factors().len(), 1);
    }

    #[test]
    fn cancellation_consumes_one_occurrence_at_a_time() {
        let scalar = Scalar::try_new(["x", "x", "1/x"]).unwrap();
        assert_eq!(scalar.to_string(), "(x)");
    }

    #[test]
    fn numeric_strings_fold_into_the_accumulator() {
        let scalar = Scalar::try_new(["4", "x", "1/2"]).unwrap();
        assert_eq!(scalar.to_string(), "2(x)");
    }

    #[test]
    fn zero_absorbs_everything() {
        let scalar = Scalar::try_new([
            Factor::from("y"),
            Factor::from(0),
            Factor::from("z"),
        ]).unwrap();

        assert_eq!(scalar.factors(), [Term::number(0.0)]);
        assert_eq!(scalar.to_string(), "0");
    }

    #[test]
    fn multiplying_by_zero_absorbs() {
        let scalar = Scalar::try_new([Factor::from(5), Factor::from("y")]).unwrap();
        let product = scalar * Scalar::zero();
        assert_eq!(product.to_string(), "0");
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let scalar = Scalar::try_new([
            Factor::from(2),
            Factor::from("y"),
            Factor::from("1/z"),
            Factor::from(3),
        ]).unwrap();

        let again = Scalar::from_terms(scalar.factors().to_vec());
        assert_eq!(again.to_string(), scalar.to_string());
        assert_eq!(again, scalar);
    }

    #[test]
    fn invert_maps_every_factor() {
        let scalar = Scalar::try_new([
            Factor::from(4),
            Factor::from("y"),
            Factor::from("1/z"),
        ]).unwrap();

        let inverted = scalar.invert().unwrap();
        assert_eq!(inverted.to_string(), "0.25(1/y)(z)");
        // the input scalar is untouched
        assert_eq!(scalar.to_string(), "4(y)(1/z)");
    }

    #[test]
    fn invert_of_zero_fails() {
        assert_eq!(Scalar::zero().invert(), Err(Error::DivideByZero));
    }

    #[test]
    fn division_failure_modes() {
        let five = Scalar::number(5.0);
        let zero = Scalar::zero();

        assert_eq!(five.divide(&zero), Err(Error::DivideByZero));
        assert_eq!(zero.divide(&zero), Err(Error::IndeterminateForm));
        assert_eq!(zero.divide(&five).unwrap().to_string(), "0");
    }

    #[test]
    fn division_by_itself_is_exactly_one() {
        let scalar = Scalar::try_new([Factor::from(3), Factor::from("y")]).unwrap();
        let quotient = scalar.divide(&scalar).unwrap();
        assert!(quotient.is_one());
    }

    #[test]
    fn multiplying_by_a_single_term_appends_a_factor() {
        let scalar = Scalar::number(2.0) * Term::symbol("y").unwrap();
        assert_eq!(scalar.to_string(), "2(y)");
    }

    #[test]
    fn sign_tracks_the_numeric_factor() {
        assert_eq!(Scalar::number(2.5).sign(), Sign::Positive);
        assert_eq!(Scalar::number(-1.0).sign(), Sign::Negative);
        assert_eq!(Scalar::zero().sign(), Sign::Zero);
        assert_eq!(Scalar::number(-1.0).negate().sign(), Sign::Positive);
    }

    #[test]
    fn unit_numeric_factor_is_omitted_from_rendering() {
        let scalar = Scalar::try_new(["y"]).unwrap();
        assert_eq!(scalar.to_string(), "(y)");
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert_eq!(
            Scalar::try_new(["x+y"]),
            Err(Error::InvalidArgument("x+y".to_string())),
        );
    }
}
