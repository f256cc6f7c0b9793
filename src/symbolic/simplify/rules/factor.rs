//! Canonicalization rules for scaling factors: absorbing a zero node
//! scaling, and hoisting factors common to both children.

use crate::symbolic::expr::Expr;
use crate::symbolic::scalar::Scalar;
use crate::symbolic::simplify::{step::Step, StepCollector};
use crate::symbolic::term::Term;
use super::do_node;

/// `0 * f = 0`
///
/// A node whose own scaling factor is the zero scalar collapses to the zero
/// scalar, whatever its children are.
pub fn absorb_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_node(expr, |func| {
        if func.scalar().is_zero() {
            Some(Expr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::AbsorbZero);
    Some(opt)
}

/// `s*f + s*g = s*(f + g)`
///
/// Extracts scaling factors common to both children of an additive node
/// into the node's own scaling, dividing them out of each child. Without
/// this, repeated operations on scaled operands grow duplicated factors
/// without bound. Multiplicative nodes need no counterpart: their
/// construction already combines both children's scalings.
pub fn hoist_common_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_node(expr, |func| {
        if !func.op().is_additive() {
            return None;
        }

        let common = common_factors(func.left().scalar(), func.right().scalar())?;
        let left = func.left().scalar().divide(&common).ok()?;
        let right = func.right().scalar().divide(&common).ok()?;

        Some(Expr::raw_node(
            func.left().with_scalar(left),
            func.right().with_scalar(right),
            func.op(),
            func.scalar().clone() * common,
        ))
    })?;

    step_collector.push(Step::HoistCommonFactor);
    Some(opt)
}

/// Collects the factors shared by both scalars: symbol factors appearing in
/// both (tag and name equal), plus the numeric coefficient when it is
/// identical on both sides and not already 1.
///
/// Returns `None` when nothing can be hoisted. A zero coefficient never
/// hoists from here; a zero child is the business of the additive identity
/// and absorption rules.
fn common_factors(left: &Scalar, right: &Scalar) -> Option<Scalar> {
    let mut shared: Vec<Term> = Vec::new();

    let numeric = left.numeric();
    if numeric == right.numeric() && !numeric.is_zero() && *numeric != 1 {
        shared.push(Term::Number(numeric.clone()));
    }

    // this is O(n^2) worst case, due to scanning the whole vec for each
    // factor; factor lists stay small in practice
    let mut remaining: Vec<&Term> = right.factors()[1..].iter().collect();
    for term in &left.factors()[1..] {
        if let Some(idx) = remaining.iter().position(|other| *other == term) {
            remaining.remove(idx);
            shared.push(term.clone());
        }
    }

    if shared.is_empty() {
        None
    } else {
        Some(Scalar::from_terms(shared))
    }
}

/// Applies all factor rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    absorb_zero(expr, step_collector)
        .or_else(|| hoist_common_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::scalar::Factor;
    use pretty_assertions::assert_eq;
    use super::*;

    fn scalar(factors: &[&str]) -> Scalar {
        Scalar::try_new(factors.iter().copied()).unwrap()
    }

    #[test]
    fn shared_symbols_and_equal_numerics_are_collected() {
        let left = Scalar::try_new([
            Factor::from(3),
            Factor::from("a"),
            Factor::from("b"),
        ]).unwrap();
        let right = Scalar::try_new([
            Factor::from(3),
            Factor::from("a"),
            Factor::from("c"),
        ]).unwrap();

        let common = common_factors(&left, &right).unwrap();
        assert_eq!(common.to_string(), "3(a)");
    }

    #[test]
    fn inverse_factors_are_matched_by_tag() {
        let common = common_factors(&scalar(&["1/a", "b"]), &scalar(&["1/a"])).unwrap();
        assert_eq!(common.to_string(), "(1/a)");
    }

    #[test]
    fn unit_numerics_and_disjoint_symbols_share_nothing() {
        assert_eq!(common_factors(&scalar(&["a"]), &scalar(&["b"])), None);
        assert_eq!(
            common_factors(&Scalar::number(1.0), &Scalar::number(1.0)),
            None,
        );
    }

    #[test]
    fn differing_numerics_share_nothing() {
        assert_eq!(
            common_factors(&Scalar::number(2.0), &Scalar::number(4.0)),
            None,
        );
    }
}
