//! Canonicalization rules for additive nodes: the zero identity, sign
//! normalization, and self-cancellation.

use crate::symbolic::expr::{BinOp, Expr};
use crate::symbolic::scalar::Sign;
use crate::symbolic::simplify::{step::Step, StepCollector};
use super::do_node;

/// `f + 0 = f`
/// `f - 0 = f`
///
/// The collapsed node's own scaling folds into the surviving side.
pub fn additive_identity(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_node(expr, |func| {
        if func.op().is_additive() && func.right().is_zero_scalar() {
            Some(func.left().rescaled_raw(func.scalar()))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure
    step_collector.push(Step::AdditiveIdentity);
    Some(opt)
}

/// `f + (-g) = f - g`
/// `f - (-g) = f + g`
pub fn normalize_sign(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_node(expr, |func| {
        if !func.op().is_additive() || func.right().sign() != Sign::Negative {
            return None;
        }

        let toggled = match func.op() {
            BinOp::Add => BinOp::Sub,
            _ => BinOp::Add,
        };
        Some(Expr::raw_node(
            func.left().clone(),
            func.right().negate(),
            toggled,
            func.scalar().clone(),
        ))
    })?;

    step_collector.push(Step::NormalizeSign);
    Some(opt)
}

/// `f - f = 0`
///
/// Whether the two operands are the same function is decided by comparing
/// their rendered forms, which is deterministic for canonical trees.
pub fn cancel_self(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_node(expr, |func| {
        if func.op() == BinOp::Sub && func.left().to_string() == func.right().to_string() {
            Some(Expr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::CancelSelf);
    Some(opt)
}

/// Applies all additive rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    additive_identity(expr, step_collector)
        .or_else(|| normalize_sign(expr, step_collector))
        .or_else(|| cancel_self(expr, step_collector))
}
