//! Implementation of the canonicalization rules.
//!
//! Each rule in this module is a function that takes the expression to
//! canonicalize as an argument, and returns `Some(expr)` with the rewritten
//! expression if the rule applies, or `None` if the rule does not apply.
//!
//! Rules rebuild nodes without re-entering canonicalization — the driver in
//! [`simplify`](super) re-applies the rule set to every rewrite until none
//! matches.

pub mod additive;
pub mod factor;

use crate::symbolic::expr::{Expr, Func};
use super::{step::Step, StepCollector};

/// If the expression is a function node, calls the given transformation
/// function with it.
///
/// Returns `Some(expr)` with the transformed expression if a transformation
/// was applied.
pub(crate) fn do_node(expr: &Expr, f: impl FnOnce(&Func) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Func(func) = expr {
        f(func)
    } else {
        None
    }
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    additive::all(expr, step_collector)
        .or_else(|| factor::all(expr, step_collector))
}
