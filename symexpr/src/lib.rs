//! Symbolic mathematical expressions.
//!
//! This crate represents a mathematical expression as an immutable tree of [`Expr`] nodes, and
//! provides the operations of a small computer algebra system over that tree:
//!
//! - numerical evaluation, given values for the variables ([`Expr::evaluate`])
//! - substitution of a variable with another expression ([`Expr::substitute`])
//! - symbolic differentiation ([`Expr::derivative`])
//! - expansion of products over sums ([`Expr::expand`])
//! - rendering as source code for a generic numeric evaluator ([`Expr::to_source`])
//! - formatting as LaTeX ([`latex::Latex`])
//!
//! ```
//! use symexpr::{numerical::Bindings, Expr};
//!
//! let x = Expr::var("x");
//! let expr = (x.clone() + 1) * x;
//!
//! let bindings = Bindings::from([("x", 5.0)]);
//! assert_eq!(expr.evaluate(&bindings).unwrap(), 30.0);
//! assert_eq!(expr.expand().evaluate(&bindings).unwrap(), 30.0);
//! assert_eq!(expr.derivative("x").unwrap().evaluate(&bindings).unwrap(), 11.0);
//! assert_eq!(expr.to_source(Default::default()).unwrap(), "((x) + (1.0)) * (x)");
//! ```
//!
//! Every fallible operation returns an [`Error`](error::Error), which can be turned into a
//! report pointing at the node of the expression that caused it with [`Expr::build_report`].
//!
//! # Features
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for [`Expr`], [`numerical::Bindings`] and the
//!   types in [`source`].

pub mod error;
pub mod expr;
pub mod funcs;
pub mod latex;
pub mod numerical;
pub mod source;
pub mod symbolic;

pub use expr::Expr;
