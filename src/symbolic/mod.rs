//! Algebraic manipulation of expression trees.
//!
//! # Expression representation
//!
//! Expressions in this module are built bottom-up from two kinds of leaves —
//! [`Scalar`] constants (canonical products of [`Term`]s) and [`Var`]
//! leaves (a free variable scaled by a `Scalar`) — joined into [`Func`]
//! nodes by the arithmetic operators. The three cases form the [`Expr`]
//! tagged union, which every operator in this module matches exhaustively.
//!
//! Every constructor and arithmetic operator re-canonicalizes its result
//! before returning it: numeric factors fold into a single leading
//! coefficient, a symbol annihilates its inverse, zero absorbs, additive
//! identities collapse, negative right-hand scalings fold into the
//! operator, and scaling factors common to both children of a node hoist
//! into the node itself. A value observed outside this module is always in
//! canonical form, so rendering it twice always produces the same string —
//! which the simplifier itself relies on to detect self-subtraction.
//!
//! ```
//! use funcdiff::{Expr, Scalar};
//!
//! let sum = Expr::var("x").unwrap() + Expr::var("y").unwrap();
//! assert_eq!(sum.to_string(), "x + y");
//!
//! let scaled = sum * Expr::Scalar(Scalar::number(3.0));
//! assert_eq!(scaled.to_string(), "3(x + y)");
//! ```
//!
//! # Differentiation
//!
//! [`derivative()`] walks a canonical tree read-only and dispatches on the
//! [`Expr`] cases: constants differentiate to the zero scalar and scaled
//! variables to their scaling. The composite rules (sum, product, quotient,
//! chain, power) are unimplemented extension points that fail with
//! [`Error::UnsupportedOperation`] instead of producing a wrong answer.

pub mod derivative;
pub mod error;
pub mod expr;
pub mod scalar;
pub mod simplify;
pub mod term;

pub use derivative::derivative;
pub use error::Error;
pub use expr::{BinOp, Expr, Func, Var};
pub use scalar::{Factor, Scalar, Sign};
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use term::Term;
