//! Symbolic manipulation of expressions.
//!
//! This module implements three tree-to-tree transformations, all as methods on
//! [`Expr`](crate::Expr):
//!
//! - [`Expr::substitute`](crate::Expr::substitute) replaces a variable with another expression.
//! - [`Expr::derivative`](crate::Expr::derivative) differentiates an expression with respect to a
//!   variable.
//! - [`Expr::expand`](crate::Expr::expand) distributes products over sums.
//!
//! None of them simplify their result. For example, the derivative of `x * x` is
//! `x * 1 + 1 * x`, not `2x`:
//!
//! ```
//! use symexpr::Expr;
//!
//! let x = Expr::var("x");
//! assert_eq!(
//!     (x.clone() * x).derivative("x").unwrap().to_string(),
//!     "Sum(Product(Variable(x),Number(1)),Product(Number(1),Variable(x)))",
//! );
//! ```

mod derivative;
mod expand;
mod substitute;
