//! Symbolic differentiation of scalar-scaled function trees.
//!
//! This crate represents mathematical expressions as trees built from
//! scalar constants and scaled variables, combined with addition,
//! subtraction, multiplication, division, and composition. Every
//! construction and arithmetic operation keeps the tree in a canonical
//! simplified form, and the derivative of a canonical tree is computed by
//! rule dispatch over its cases.
//!
//! ```
//! use funcdiff::{derivative, Expr, Scalar, Var};
//!
//! // f = 2x
//! let f = Expr::Var(Var::new(Scalar::number(2.0), "x").unwrap());
//! assert_eq!(f.to_string(), "2x");
//!
//! // d/dx 2x = 2
//! assert_eq!(derivative(&f).unwrap().to_string(), "2");
//!
//! // f - f collapses to the canonical zero scalar
//! let difference = f.clone() - f;
//! assert_eq!(difference.to_string(), "0");
//! ```
//!
//! All values are immutable-by-convention: operators never mutate an
//! operand, they build and return a new canonical tree. Reading a completed
//! tree from multiple threads is therefore safe by construction, as is
//! deriving new trees concurrently from a shared source.
//!
//! See the [`symbolic`] module for the expression representation and the
//! canonicalization rules.

pub mod consts;
pub mod primitive;
pub mod symbolic;

pub use symbolic::{
    derivative, simplify, simplify_with_steps, BinOp, Error, Expr, Factor, Func, Scalar, Sign,
    Term, Var,
};
