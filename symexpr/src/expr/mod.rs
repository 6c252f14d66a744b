//! The expression tree.
//!
//! An [`Expr`] is an immutable tree of typed nodes. Every node owns its children exclusively, so
//! a tree can never contain shared sub-trees or cycles. None of the operations provided by this
//! crate mutate an existing tree; substitution, differentiation and expansion always build a new
//! one.
//!
//! Trees are built with the named constructors on [`Expr`], or with the arithmetic operators,
//! which are thin wrappers over them. Numeric operands on either side are wrapped into
//! [`Expr::Number`] automatically:
//!
//! ```
//! use symexpr::Expr;
//!
//! let x = Expr::var("x");
//! let expr = 3 * x.clone().pow(2) + x.sin();
//! assert_eq!(
//!     expr.to_string(),
//!     "Sum(Product(Number(3),Power(Variable(x),Number(2))),Apply(Function(\"sin\"),Variable(x)))",
//! );
//! ```
//!
//! The operators never flatten: `a + b + c` is `Sum(Sum(a, b), c)`, not `Sum(a, b, c)`. Use
//! [`Expr::sum`] to build a single sum with many operands.
//!
//! # Display
//!
//! The [`Display`](std::fmt::Display) implementation produces a debug-oriented representation
//! that names every node and its children. Two trees are structurally equal exactly when their
//! display forms are equal. To turn an expression into source code that a numeric evaluator can
//! run, see [`Expr::to_source`].

mod iter;
mod ops;

pub use iter::ExprIter;
pub use ops::{package, Package};

use crate::error::{kind::EmptySum, Error};
use std::{collections::BTreeSet, fmt::{Display, Formatter}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mathematical expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal number, such as `2` or `0.5`.
    Number(f64),

    /// A named quantity, such as `x`. Its value is supplied at evaluation time.
    Variable(String),

    /// The sum of one or more operands. The order of the operands only matters for display.
    Sum(Vec<Expr>),

    /// `lhs - rhs`
    Difference(Box<Expr>, Box<Expr>),

    /// `lhs * rhs`
    Product(Box<Expr>, Box<Expr>),

    /// `numerator / denominator`
    Quotient(Box<Expr>, Box<Expr>),

    /// `base ^ exponent`
    Power(Box<Expr>, Box<Expr>),

    /// `-inner`
    Negative(Box<Expr>),

    /// A function from the [function registry](crate::funcs) applied to an argument, such as
    /// `sin(x)`.
    ///
    /// The name is not checked when the node is built. Operations that need the function fail
    /// with [`UnknownFunction`](crate::error::kind::UnknownFunction) if it is not registered.
    Apply(String, Box<Expr>),
}

impl Expr {
    /// Creates a literal number.
    pub fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Creates a variable with the given symbol.
    pub fn var(symbol: impl Into<String>) -> Self {
        Self::Variable(symbol.into())
    }

    /// Creates a sum of the given operands. Returns [`Err`] if there are no operands.
    pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Result<Self, Error> {
        let terms = terms.into_iter().collect::<Vec<_>>();
        if terms.is_empty() {
            return Err(Error::new(EmptySum));
        }
        Ok(Self::Sum(terms))
    }

    /// Creates the difference `lhs - rhs`.
    pub fn difference(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::Difference(Box::new(lhs.into()), Box::new(rhs.into()))
    }

    /// Creates the product `lhs * rhs`.
    pub fn product(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::Product(Box::new(lhs.into()), Box::new(rhs.into()))
    }

    /// Creates the quotient `numerator / denominator`.
    pub fn quotient(numerator: impl Into<Expr>, denominator: impl Into<Expr>) -> Self {
        Self::Quotient(Box::new(numerator.into()), Box::new(denominator.into()))
    }

    /// Creates the power `base ^ exponent`.
    pub fn power(base: impl Into<Expr>, exponent: impl Into<Expr>) -> Self {
        Self::Power(Box::new(base.into()), Box::new(exponent.into()))
    }

    /// Creates the negation `-inner`.
    pub fn negative(inner: impl Into<Expr>) -> Self {
        Self::Negative(Box::new(inner.into()))
    }

    /// Applies the function with the given name to `argument`.
    pub fn apply(function: impl Into<String>, argument: impl Into<Expr>) -> Self {
        Self::Apply(function.into(), Box::new(argument.into()))
    }

    /// Raises this expression to the given power.
    pub fn pow(self, exponent: impl Into<Expr>) -> Self {
        Self::power(self, exponent)
    }

    /// `sin(self)`
    pub fn sin(self) -> Self {
        Self::apply("sin", self)
    }

    /// `cos(self)`
    pub fn cos(self) -> Self {
        Self::apply("cos", self)
    }

    /// `ln(self)`, the natural logarithm.
    pub fn ln(self) -> Self {
        Self::apply("ln", self)
    }

    /// `sqrt(self)`
    pub fn sqrt(self) -> Self {
        Self::apply("sqrt", self)
    }

    /// If the expression is a [`Expr::Number`], returns the contained number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// If the expression is a [`Expr::Variable`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Variable(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Calls `f` with the index and a reference to each direct child of this node, from left to
    /// right.
    pub(crate) fn for_each_child<'a>(&'a self, mut f: impl FnMut(usize, &'a Expr)) {
        match self {
            Self::Number(_) | Self::Variable(_) => (),
            Self::Sum(terms) => terms.iter().enumerate().for_each(|(i, term)| f(i, term)),
            Self::Difference(lhs, rhs)
                | Self::Product(lhs, rhs)
                | Self::Quotient(lhs, rhs)
                | Self::Power(lhs, rhs) => {
                f(0, lhs);
                f(1, rhs);
            },
            Self::Negative(inner) | Self::Apply(_, inner) => f(0, inner),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }

    /// Returns true if the variable with the given symbol appears anywhere in the expression.
    pub fn contains(&self, symbol: &str) -> bool {
        self.post_order_iter()
            .any(|expr| expr.as_symbol() == Some(symbol))
    }

    /// Returns true if the expression contains a [`Expr::Sum`] node.
    pub fn contains_sum(&self) -> bool {
        self.post_order_iter()
            .any(|expr| matches!(expr, Self::Sum(_)))
    }

    /// Returns the symbols of all distinct variables in the expression.
    pub fn free_variables(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(Self::as_symbol)
            .collect()
    }

    /// Returns the names of all distinct functions applied in the expression, whether they are
    /// registered or not.
    pub fn distinct_functions(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(|expr| match expr {
                Self::Apply(name, _) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the height of the tree. A single leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1)];
        while let Some((expr, depth)) = stack.pop() {
            max = max.max(depth);
            expr.for_each_child(|_, child| stack.push((child, depth + 1)));
        }
        max
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "Number({})", n),
            Self::Variable(symbol) => write!(f, "Variable({})", symbol),
            Self::Sum(terms) => {
                write!(f, "Sum(")?;
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, ",{}", term)?;
                    }
                }
                write!(f, ")")
            },
            Self::Difference(lhs, rhs) => write!(f, "Difference({},{})", lhs, rhs),
            Self::Product(lhs, rhs) => write!(f, "Product({},{})", lhs, rhs),
            Self::Quotient(lhs, rhs) => write!(f, "Quotient({},{})", lhs, rhs),
            Self::Power(lhs, rhs) => write!(f, "Power({},{})", lhs, rhs),
            Self::Negative(inner) => write!(f, "Negative({})", inner),
            Self::Apply(name, arg) => write!(f, "Apply(Function({:?}),{})", name, arg),
        }
    }
}
