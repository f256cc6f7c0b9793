//! The expression tree: a tagged union of scalar constants, scaled variable
//! leaves, and binary function nodes.
//!
//! # Representation
//!
//! Every expression is one of three cases, and every arithmetic operator in
//! this crate matches on them exhaustively:
//!
//! - [`Expr::Scalar`] — a constant coefficient expression, a canonical
//!   product of [`Term`](super::term::Term)s.
//! - [`Expr::Var`] — the leaf case: a single free variable scaled by a
//!   [`Scalar`], representing `scalar * variable`.
//! - [`Expr::Func`] — a binary node joining two child expressions with a
//!   [`BinOp`], scaled by its own [`Scalar`].
//!
//! Trees are exclusively owned and never cyclic: an operator consumes (or
//! clones) its operands and returns a brand-new canonical tree, so a
//! completed expression is never mutated by later operations on the values
//! derived from it.
//!
//! # Canonical form and rendered equality
//!
//! Every constructor that can produce a composite pipes the result through
//! [`simplify`](super::simplify::simplify) before it is exposed, so any
//! `Expr` observed by calling code is already canonical. One canonicalization
//! rule — self-subtraction — decides whether two subtrees are the same
//! function by comparing their rendered forms, which is why rendering must
//! be a deterministic, read-only traversal: for a given canonical tree it
//! always produces the same string.

mod iter;

use std::fmt;
use std::ops::{Add, Mul, Sub};
use super::error::Error;
use super::scalar::{Scalar, Sign};
use super::simplify;
use super::term::Term;

pub use iter::ExprIter;

/// The binary operator joining a [`Func`] node's two children.
///
/// The representation is not commutative: `(left, right)` under
/// [`BinOp::Sub`] means `left - right`. [`BinOp::Compose`] is the
/// juxtaposition operator; it is also the conceptual tag of the variable
/// leaf case, which is why both render without an infix symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Compose,
}

impl BinOp {
    /// The infix spelling used when rendering, or `None` for composition,
    /// which renders as direct juxtaposition.
    fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::Add => Some("+"),
            Self::Sub => Some("-"),
            Self::Mul => Some("*"),
            Self::Div => Some("/"),
            Self::Compose => None,
        }
    }

    /// Returns true for the additive operators.
    pub(crate) fn is_additive(&self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

/// The leaf of the function tree: a single free variable scaled by a
/// [`Scalar`], representing `scalar * variable`.
///
/// This is the terminal case of both simplification (a leaf is already
/// canonical once its scalar is) and differentiation (the derivative of
/// `c * x` is `c`).
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub(crate) scalar: Scalar,
    pub(crate) name: String,
}

impl Var {
    /// Creates the leaf `scalar * name`. Fails with
    /// [`Error::InvalidArgument`] if `name` is not a valid symbol name.
    pub fn new(scalar: Scalar, name: &str) -> Result<Self, Error> {
        let Term::Symbol(name) = Term::symbol(name)? else {
            unreachable!("Term::symbol only builds symbols");
        };
        Ok(Self { scalar, name })
    }

    /// Shorthand for a variable with unit scaling.
    pub fn unit(name: &str) -> Result<Self, Error> {
        Self::new(Scalar::one(), name)
    }

    /// The scaling factor.
    pub fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// The variable's symbol name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns this variable rescaled by an extra scalar factor.
    pub fn scaled(&self, by: &Scalar) -> Var {
        Var {
            scalar: self.scalar.clone() * by.clone(),
            name: self.name.clone(),
        }
    }

    /// The sign of the scaling factor.
    pub fn sign(&self) -> Sign {
        self.scalar.sign()
    }
}

/// Renders the scaling factor directly before the variable name, omitting a
/// scaling of exactly 1.
impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scalar.is_one() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}", self.scalar, self.name)
        }
    }
}

/// A binary node joining two child expressions with a [`BinOp`], scaled by
/// its own [`Scalar`].
///
/// After canonicalization no scalar factor common to both children remains
/// split between them: it is hoisted into this node's scalar. That hoisting
/// is what makes [`Func::sign`] correct while consulting only the node's own
/// scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub(crate) left: Expr,
    pub(crate) right: Expr,
    pub(crate) op: BinOp,
    pub(crate) scalar: Scalar,
}

impl Func {
    /// The left child. Never absent; for non-commutative operators this is
    /// the first operand (`left - right`).
    pub fn left(&self) -> &Expr {
        &self.left
    }

    /// The right child.
    pub fn right(&self) -> &Expr {
        &self.right
    }

    /// The operator joining the children.
    pub fn op(&self) -> BinOp {
        self.op
    }

    /// The node's own scaling factor.
    pub fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// The sign of the node's own scaling factor.
    pub fn sign(&self) -> Sign {
        self.scalar.sign()
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op.symbol() {
            Some(symbol) => {
                fmt_operand(&self.left, f)?;
                write!(f, " {} ", symbol)?;
                fmt_operand(&self.right, f)
            },
            None => {
                fmt_operand(&self.left, f)?;
                fmt_operand(&self.right, f)
            },
        }
    }
}

/// Renders the node's children joined by the operator symbol, prefixed by
/// the node's scaling factor when it is not exactly 1.
impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scalar.is_one() {
            self.fmt_body(f)
        } else {
            write!(f, "{}(", self.scalar)?;
            self.fmt_body(f)?;
            write!(f, ")")
        }
    }
}

/// Writes a child expression, parenthesizing it unless it is a leaf or a
/// composition node.
fn fmt_operand(expr: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if expr.needs_parens() {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// A mathematical expression: a scalar constant, a scaled variable leaf, or
/// a binary function node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant coefficient expression.
    Scalar(Scalar),

    /// A scaled variable leaf.
    Var(Var),

    /// A composite function node.
    Func(Box<Func>),
}

impl Expr {
    /// The canonical zero expression.
    pub fn zero() -> Self {
        Self::Scalar(Scalar::zero())
    }

    /// Creates a variable expression with unit scaling.
    pub fn var(name: &str) -> Result<Self, Error> {
        Ok(Self::Var(Var::unit(name)?))
    }

    /// Builds a function node from parts and canonicalizes it before it is
    /// exposed.
    pub fn node(left: Expr, right: Expr, op: BinOp, scalar: Scalar) -> Expr {
        simplify::simplify(&Self::raw_node(left, right, op, scalar))
    }

    /// Builds a function node without canonicalizing. Only canonicalization
    /// itself may observe a value built this way.
    pub(crate) fn raw_node(left: Expr, right: Expr, op: BinOp, scalar: Scalar) -> Expr {
        Self::Func(Box::new(Func { left, right, op, scalar }))
    }

    /// Composes two expressions, `self ∘ other`.
    ///
    /// The left operand's scaling hoists to the node, since
    /// `(a·f) ∘ g = a·(f ∘ g)`; the right operand is an argument
    /// transformation and keeps its own scaling.
    pub fn compose(self, other: Expr) -> Expr {
        let (outer, scalar) = self.take_scalar();
        Expr::node(outer, other, BinOp::Compose, scalar)
    }

    /// The scaling coefficient of this expression: the scalar itself for a
    /// constant, or the owned scalar of the leaf or node.
    pub fn scalar(&self) -> &Scalar {
        match self {
            Self::Scalar(scalar) => scalar,
            Self::Var(var) => &var.scalar,
            Self::Func(func) => &func.scalar,
        }
    }

    fn scalar_mut(&mut self) -> &mut Scalar {
        match self {
            Self::Scalar(scalar) => scalar,
            Self::Var(var) => &mut var.scalar,
            Self::Func(func) => &mut func.scalar,
        }
    }

    /// The sign of this expression's own scaling factor.
    pub fn sign(&self) -> Sign {
        self.scalar().sign()
    }

    /// Returns true if this expression is the canonical zero scalar.
    pub fn is_zero_scalar(&self) -> bool {
        matches!(self, Self::Scalar(scalar) if scalar.is_zero())
    }

    /// Returns this expression with the given scalar in place of its own.
    pub(crate) fn with_scalar(&self, scalar: Scalar) -> Expr {
        let mut out = self.clone();
        *out.scalar_mut() = scalar;
        out
    }

    /// Returns this expression with an extra scalar factor folded into its
    /// own scaling, without canonicalizing the tree.
    pub(crate) fn rescaled_raw(&self, by: &Scalar) -> Expr {
        self.with_scalar(self.scalar().clone() * by.clone())
    }

    /// Hoists a scalar factor into this expression's own scaling and
    /// canonicalizes the result.
    pub fn rescaled(&self, by: &Scalar) -> Expr {
        simplify::simplify(&self.rescaled_raw(by))
    }

    /// Returns this expression scaled by −1.
    pub(crate) fn negate(&self) -> Expr {
        self.with_scalar(self.scalar().negate())
    }

    /// Splits this expression into the remainder rescaled to unit and its
    /// scalar coefficient.
    pub(crate) fn take_scalar(self) -> (Expr, Scalar) {
        match self {
            Self::Scalar(scalar) => (Self::Scalar(Scalar::one()), scalar),
            Self::Var(var) => (
                Self::Var(Var { scalar: Scalar::one(), name: var.name }),
                var.scalar,
            ),
            Self::Func(mut func) => {
                let scalar = std::mem::replace(&mut func.scalar, Scalar::one());
                (Self::Func(func), scalar)
            },
        }
    }

    /// Divides this expression by `other`.
    ///
    /// Dividing by a scalar rescales in place through scalar division,
    /// inheriting its zero and indeterminate failures. Dividing a function
    /// by a function builds a Div node combining both sides' scalars the
    /// same way. Dividing a scalar by a function has no defined rule (there
    /// is no function inverse) and fails with
    /// [`Error::UnsupportedOperation`].
    pub fn divide(self, other: Expr) -> Result<Expr, Error> {
        match (self, other) {
            (Self::Scalar(lhs), Self::Scalar(rhs)) => Ok(Self::Scalar(lhs.divide(&rhs)?)),
            (lhs, Self::Scalar(rhs)) => {
                let rescaled = lhs.scalar().divide(&rhs)?;
                Ok(simplify::simplify(&lhs.with_scalar(rescaled)))
            },
            (Self::Scalar(_), _) => {
                Err(Error::UnsupportedOperation("dividing a scalar by a function"))
            },
            (lhs, rhs) => {
                let (left, lhs_scalar) = lhs.take_scalar();
                let (right, rhs_scalar) = rhs.take_scalar();
                Ok(Expr::node(left, right, BinOp::Div, lhs_scalar.divide(&rhs_scalar)?))
            },
        }
    }

    /// Returns true if rendering this expression as an operand requires
    /// parentheses: composite nodes only, except composition, which renders
    /// as juxtaposition.
    fn needs_parens(&self) -> bool {
        match self {
            Self::Scalar(_) | Self::Var(_) => false,
            Self::Func(func) => func.op != BinOp::Compose,
        }
    }

    /// Returns an iterator that traverses the expression tree in
    /// left-to-right post-order (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// The number of nodes in the expression tree — the complexity measure
    /// that canonicalization must never increase.
    pub fn complexity(&self) -> usize {
        self.post_order_iter().count()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{}", scalar),
            Self::Var(var) => write!(f, "{}", var),
            Self::Func(func) => write!(f, "{}", func),
        }
    }
}

impl From<Scalar> for Expr {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self {
        Self::Var(var)
    }
}

impl From<Term> for Expr {
    fn from(term: Term) -> Self {
        Self::Scalar(Scalar::from(term))
    }
}

/// Adds two expressions, wrapping them in an additive node with unit
/// scaling and canonicalizing the result.
impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::node(self, rhs, BinOp::Add, Scalar::one())
    }
}

/// Subtracts `rhs` from this expression. The representation is positional:
/// the right child is the subtrahend.
impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::node(self, rhs, BinOp::Sub, Scalar::one())
    }
}

/// Multiplies two expressions. A scalar operand hoists into the other
/// side's own scaling; two function-like operands build a Mul node whose
/// scalar combines both sides' scalars, with the children rescaled to unit
/// so no factor is counted twice.
impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Self::Scalar(lhs), Self::Scalar(rhs)) => Self::Scalar(lhs * rhs),
            (Self::Scalar(scalar), other) | (other, Self::Scalar(scalar)) => {
                other.rescaled(&scalar)
            },
            (lhs, rhs) => {
                let (left, lhs_scalar) = lhs.take_scalar();
                let (right, rhs_scalar) = rhs.take_scalar();
                Expr::node(left, right, BinOp::Mul, lhs_scalar * rhs_scalar)
            },
        }
    }
}

/// Hoists a scalar multiplier into the expression's own scaling.
impl Mul<Scalar> for Expr {
    type Output = Expr;

    fn mul(self, rhs: Scalar) -> Expr {
        self * Expr::Scalar(rhs)
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::scalar::Factor;
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::var(name).unwrap()
    }

    fn scaled_var(n: f64, name: &str) -> Expr {
        Expr::Var(Var::new(Scalar::number(n), name).unwrap())
    }

    #[test]
    fn leaf_rendering() {
        assert_eq!(var("x").to_string(), "x");
        assert_eq!(scaled_var(3.0, "x").to_string(), "3x");

        let scalar = Scalar::try_new([Factor::from(2), Factor::from("y")]).unwrap();
        let leaf = Expr::Var(Var::new(scalar, "x").unwrap());
        assert_eq!(leaf.to_string(), "2(y)x");
    }

    #[test]
    fn additive_rendering_spaces_the_operator() {
        let sum = var("x") + var("y");
        assert_eq!(sum.to_string(), "x + y");
    }

    #[test]
    fn composite_operands_are_parenthesized() {
        let sum = var("x") + var("y");
        let product = sum * var("z");
        assert_eq!(product.to_string(), "(x + y) * z");
    }

    #[test]
    fn composition_renders_as_juxtaposition() {
        let outer = scaled_var(2.0, "x");
        let composed = outer.compose(var("y"));
        assert_eq!(composed.to_string(), "2(xy)");
    }

    #[test]
    fn multiplying_functions_combines_their_scalings() {
        let product = scaled_var(2.0, "x") * scaled_var(3.0, "y");

        let Expr::Func(func) = &product else {
            panic!("expected a function node, got {}", product);
        };
        assert_eq!(func.op(), BinOp::Mul);
        assert_eq!(func.scalar().to_string(), "6");
        assert!(func.left().scalar().is_one());
        assert!(func.right().scalar().is_one());
        assert_eq!(product.to_string(), "6(x * y)");
    }

    #[test]
    fn scalar_multiplication_hoists_into_the_function() {
        let leaf = scaled_var(2.0, "x");
        let scaled = leaf * Scalar::number(3.0);
        assert_eq!(scaled.to_string(), "6x");
    }

    #[test]
    fn rescaling_a_variable_leaf_multiplies_its_scaling() {
        let leaf = Var::new(Scalar::number(2.0), "x").unwrap();
        let scaled = leaf.scaled(&Scalar::number(3.0));
        assert_eq!(Expr::from(scaled).to_string(), "6x");
    }

    #[test]
    fn multiplying_by_a_symbol_scalar_rescales() {
        // a scalar is an abstract coefficient expression: symbols inside it
        // are free constants, so this multiplication is defined
        let leaf = scaled_var(2.0, "x");
        let coeff = Scalar::try_new(["x"]).unwrap();
        let scaled = leaf * Expr::Scalar(coeff);
        assert_eq!(scaled.to_string(), "2(x)x");
    }

    #[test]
    fn dividing_a_function_by_a_scalar_rescales() {
        let leaf = scaled_var(6.0, "x");
        let halved = leaf.divide(Expr::Scalar(Scalar::number(2.0))).unwrap();
        assert_eq!(halved.to_string(), "3x");
    }

    #[test]
    fn dividing_functions_builds_a_quotient_node() {
        let quotient = scaled_var(6.0, "x")
            .divide(scaled_var(2.0, "y"))
            .unwrap();
        assert_eq!(quotient.to_string(), "3(x / y)");
    }

    #[test]
    fn dividing_a_scalar_by_a_function_is_unsupported() {
        let result = Expr::from(Term::number(1.0)).divide(var("x"));
        assert_eq!(
            result,
            Err(Error::UnsupportedOperation("dividing a scalar by a function")),
        );
    }

    #[test]
    fn dividing_by_a_zero_function_scaling_fails() {
        let zero_scaled = Expr::Var(Var::new(Scalar::zero(), "y").unwrap());
        let result = var("x").divide(zero_scaled);
        assert_eq!(result, Err(Error::DivideByZero));
    }

    #[test]
    fn complexity_counts_nodes() {
        assert_eq!(var("x").complexity(), 1);
        assert_eq!((var("x") + var("y")).complexity(), 3);
        assert_eq!(((var("x") + var("y")) * var("z")).complexity(), 5);
    }

    #[test]
    fn post_order_visits_children_first() {
        let sum = var("x") + var("y");
        let rendered: Vec<String> = sum.post_order_iter()
            .map(|node| node.to_string())
            .collect();
        assert_eq!(rendered, ["x", "y", "x + y"]);
    }
}
