//! Canonicalization of expression trees.
//!
//! An expression is canonical when none of the rules in [`rules`] applies
//! anywhere in its tree: additive identities are collapsed, negative
//! right-hand scalings are folded into the operator, self-subtractions have
//! vanished, and no scalar factor common to both children of a node remains
//! split between them. Scalar-level canonicalization (numeric folding,
//! inverse cancellation, zero absorption) is inherent to
//! [`Scalar`](super::scalar::Scalar) construction and never needs a rule
//! here.
//!
//! Each rule is a function that accepts an expression and returns
//! `Some(expr)` with the rewritten expression if the rule applies, or `None`
//! if it does not. The driver canonicalizes the children of a node first,
//! then applies the rule set at the node until no rule matches. Every rule
//! either reduces the complexity of the expression (its node count) or
//! normalizes it without re-triggering itself, so the loop always reaches a
//! fixpoint.
//!
//! Construction is the only entry point that needs canonicalization:
//! arithmetic operators pipe every freshly built node through [`simplify`]
//! before returning it, so calling code never observes a non-canonical
//! value.

pub mod rules;
pub mod step;

use super::expr::Expr;
use step::Step;

/// A type that collects the steps taken by canonicalization.
///
/// `StepCollector` is implemented for the unit type `()`, for callers that
/// do not care about the steps, and for `Vec<Step>`, which records them in
/// application order.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        self.push(step);
    }
}

/// Canonicalizes the expression, applying every rule to a fixpoint.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, &mut ())
}

/// Canonicalizes the expression and returns the steps taken along the way.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, &mut steps);
    (simplified, steps)
}

/// Canonicalizes the expression, reporting each applied rule to the given
/// step collector.
pub fn simplify_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let mut current = expr.clone();
    loop {
        // canonicalize the children first so the node rules observe
        // canonical operands
        let descended = descend(&current, step_collector);

        match rules::all(&descended, step_collector) {
            Some(rewritten) => current = rewritten,
            None => return descended,
        }
    }
}

/// Rebuilds the expression with canonicalized children. Leaves are already
/// canonical: their scalars canonicalize at construction, and the variable
/// leaf is the terminal case of the recursion.
fn descend(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    match expr {
        Expr::Scalar(_) | Expr::Var(_) => expr.clone(),
        Expr::Func(func) => Expr::raw_node(
            simplify_with(func.left(), step_collector),
            simplify_with(func.right(), step_collector),
            func.op(),
            func.scalar().clone(),
        ),
    }
}
