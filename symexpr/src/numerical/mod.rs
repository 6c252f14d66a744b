//! Numerical evaluation of expressions.
//!
//! An expression is evaluated with [`Expr::evaluate`](crate::Expr::evaluate), given a set of
//! [`Bindings`] that assign a value to each of its variables. Every value is an `f64`.

pub mod bindings;
mod eval;

pub use bindings::{Bindings, MAX_DEPTH};
