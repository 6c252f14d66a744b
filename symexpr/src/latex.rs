//! Formatting expressions as LaTeX.
//!
//! Unlike [`Expr::to_source`], the LaTeX form is meant to be read, so it only adds the
//! parentheses needed to keep the structure of the tree unambiguous:
//!
//! ```
//! use symexpr::{latex::Latex, Expr};
//!
//! let x = Expr::var("x");
//! let expr = (x.clone() + 1).pow(2) / x.clone().sqrt() - x.sin();
//! assert_eq!(
//!     expr.as_display().to_string(),
//!     "\\frac{\\left(x + 1\\right)^{2}}{\\sqrt{x}} - \\sin\\left(x\\right)",
//! );
//! ```

use crate::{funcs, Expr};
use std::fmt::{Display, Formatter, Result};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter<'_>) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.0.fmt_latex(f)
    }
}

/// How tightly a node binds its operands, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    /// Sums and differences.
    Term,

    /// Products.
    Factor,

    /// Negations, including negative numbers.
    Unary,

    /// Powers.
    Exp,

    /// Nodes that are delimited on their own: variables, non-negative numbers, fractions and
    /// function calls.
    Atom,
}

fn precedence(expr: &Expr) -> Precedence {
    match expr {
        Expr::Number(n) if n.is_sign_negative() => Precedence::Unary,
        Expr::Sum(_) | Expr::Difference(..) => Precedence::Term,
        Expr::Product(..) => Precedence::Factor,
        Expr::Negative(_) => Precedence::Unary,
        Expr::Power(..) => Precedence::Exp,
        Expr::Number(_) | Expr::Variable(_) | Expr::Quotient(..) | Expr::Apply(..) => {
            Precedence::Atom
        },
    }
}

/// Writes `expr`, wrapped in `\left(` and `\right)` if `paren` is true.
fn fmt_operand(f: &mut Formatter<'_>, expr: &Expr, paren: bool) -> Result {
    if paren {
        write!(f, "\\left(")?;
        expr.fmt_latex(f)?;
        write!(f, "\\right)")
    } else {
        expr.fmt_latex(f)
    }
}

/// Helper to format powers. Only variables and non-negative numbers are left bare as the base.
fn fmt_pow(f: &mut Formatter<'_>, base: &Expr, exponent: &Expr) -> Result {
    let bare = matches!(base, Expr::Variable(_))
        || matches!(base, Expr::Number(n) if !n.is_sign_negative());
    fmt_operand(f, base, !bare)?;
    write!(f, "^{{")?;
    exponent.fmt_latex(f)?;
    write!(f, "}}")
}

fn fmt_number(f: &mut Formatter<'_>, n: f64) -> Result {
    if n.is_nan() {
        write!(f, "\\mathrm{{NaN}}")
    } else if n.is_infinite() {
        write!(f, "{}\\infty", if n < 0.0 { "-" } else { "" })
    } else {
        write!(f, "{}", n)
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Number(n) => fmt_number(f, *n),
            Self::Variable(symbol) => write!(f, "{}", symbol),
            Self::Sum(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    term.fmt_latex(f)?;
                    for term in iter {
                        write!(f, " + ")?;
                        term.fmt_latex(f)?;
                    }
                }
                Ok(())
            },
            Self::Difference(lhs, rhs) => {
                lhs.fmt_latex(f)?;
                write!(f, " - ")?;
                fmt_operand(f, rhs, matches!(precedence(rhs), Precedence::Term | Precedence::Unary))
            },
            Self::Product(lhs, rhs) => {
                fmt_operand(f, lhs, precedence(lhs) < Precedence::Factor)?;
                write!(f, " \\cdot ")?;
                fmt_operand(f, rhs, precedence(rhs) <= Precedence::Unary)
            },
            Self::Quotient(lhs, rhs) => {
                write!(f, "\\frac{{")?;
                lhs.fmt_latex(f)?;
                write!(f, "}}{{")?;
                rhs.fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Power(lhs, rhs) => fmt_pow(f, lhs, rhs),
            Self::Negative(inner) => {
                write!(f, "-")?;
                fmt_operand(f, inner, matches!(precedence(inner), Precedence::Term | Precedence::Unary))
            },
            Self::Apply(name, arg) => match (name.as_str(), funcs::get(name)) {
                ("sqrt", Some(_)) => {
                    write!(f, "\\sqrt{{")?;
                    arg.fmt_latex(f)?;
                    write!(f, "}}")
                },
                (_, Some(builtin)) => {
                    write!(f, "\\{}", builtin.name())?;
                    fmt_operand(f, arg, true)
                },
                (_, None) => {
                    write!(f, "\\mathrm{{ {} }}", name)?;
                    fmt_operand(f, arg, true)
                },
            },
        }
    }
}
