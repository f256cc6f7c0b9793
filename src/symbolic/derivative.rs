//! Symbolic differentiation of expression trees.

use super::error::Error;
use super::expr::Expr;
use super::scalar::Scalar;

/// Computes the derivative of the given expression with respect to its free
/// variable. Returns [`Err`] if no differentiation rule is implemented for
/// the expression.
///
/// Two rules are implemented: the constant rule (the derivative of any
/// scalar is the zero scalar) and the linear-scaling rule (the derivative of
/// `c * x` is `c`). Differentiating a composite node requires the sum,
/// product, quotient, or chain rule — those are extension points that fail
/// with [`Error::UnsupportedOperation`] rather than guessing a formula.
//
// TODO: the sum rule is the natural first extension; it needs no new
// machinery beyond recursing into both children of an additive node.
pub fn derivative(expr: &Expr) -> Result<Expr, Error> {
    match expr {
        Expr::Scalar(_) => Ok(Expr::Scalar(Scalar::zero())),
        Expr::Var(var) => Ok(Expr::Scalar(var.scalar().clone())),
        Expr::Func(_) => Err(Error::UnsupportedOperation(
            "differentiating a composite function",
        )),
    }
}
