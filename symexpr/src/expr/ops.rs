//! Construction of expressions from arithmetic operators and plain values.
//!
//! There are two ways to turn a number into an expression, and they differ in when a bad number
//! is caught:
//!
//! - [`package`] checks the value up front and fails with [`InvalidOperand`].
//! - The operators, the named constructors on [`Expr`] and the `From` conversions never fail.
//!   A non-finite number becomes an [`Expr::Number`] as it is, and the failure is deferred to the
//!   operations that need a finite literal: [`Expr::evaluate`] fails with
//!   [`NonFiniteResult`](crate::error::kind::NonFiniteResult) and [`Expr::to_source`] fails with
//!   [`InvalidOperand`], both pointing at the offending node.

use crate::error::{kind::InvalidOperand, Error};
use std::ops::{Add, Div, Mul, Neg, Sub};
use super::Expr;

/// The largest integer magnitude that every `f64` can represent exactly (`2^53`).
const MAX_EXACT_INT: u64 = 1 << 53;

/// A value that can be normalized into an [`Expr`].
///
/// Expressions pass through unchanged and numbers are wrapped into [`Expr::Number`]. Numbers that
/// cannot become a well-defined literal, such as `NaN` or integers too large to be represented
/// exactly as an `f64`, are rejected.
pub trait Package {
    /// Normalizes the value into an expression.
    fn package(self) -> Result<Expr, Error>;
}

/// Normalizes the given value into an [`Expr`]. See [`Package`] for details.
///
/// ```
/// use symexpr::{error::kind::InvalidOperand, expr::package, Expr};
///
/// assert_eq!(package(2).unwrap(), Expr::Number(2.0));
/// assert!(package(f64::NAN).unwrap_err().is::<InvalidOperand>());
/// ```
pub fn package(value: impl Package) -> Result<Expr, Error> {
    value.package()
}

impl Package for Expr {
    fn package(self) -> Result<Expr, Error> {
        Ok(self)
    }
}

impl Package for &Expr {
    fn package(self) -> Result<Expr, Error> {
        Ok(self.clone())
    }
}

impl Package for f64 {
    fn package(self) -> Result<Expr, Error> {
        if self.is_finite() {
            Ok(Expr::Number(self))
        } else {
            Err(Error::new(InvalidOperand {
                value: self.to_string(),
                reason: "literal numbers must be finite",
            }))
        }
    }
}

impl Package for f32 {
    fn package(self) -> Result<Expr, Error> {
        f64::from(self).package()
    }
}

/// Integers that always fit in an `f64` without loss.
macro_rules! package_exact {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Package for $ty {
                fn package(self) -> Result<Expr, Error> {
                    Ok(Expr::Number(f64::from(self)))
                }
            }
        )*
    };
}

/// Integers that only fit in an `f64` if their magnitude is at most `2^53`.
macro_rules! package_checked {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Package for $ty {
                fn package(self) -> Result<Expr, Error> {
                    if (self as i128).unsigned_abs() <= MAX_EXACT_INT as u128 {
                        Ok(Expr::Number(self as f64))
                    } else {
                        Err(Error::new(InvalidOperand {
                            value: self.to_string(),
                            reason: "integers larger than 2^53 cannot be represented exactly",
                        }))
                    }
                }
            }
        )*
    };
}

package_exact!(i8, i16, i32, u8, u16, u32);
package_checked!(i64, u64, isize, usize);

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

/// Implements a binary operator for [`Expr`] and `&Expr` with any right-hand side convertible
/// into an [`Expr`], and for numeric left-hand sides.
macro_rules! binary_op {
    ($($trait:ident $method:ident => $build:path),* $(,)?) => {
        $(
            impl<T: Into<Expr>> $trait<T> for Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Expr {
                    $build(self, rhs)
                }
            }

            impl<T: Into<Expr>> $trait<T> for &Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Expr {
                    $build(self.clone(), rhs)
                }
            }

            impl $trait<Expr> for f64 {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    $build(self, rhs)
                }
            }

            impl $trait<Expr> for i32 {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    $build(self, rhs)
                }
            }
        )*
    };
}

/// `lhs + rhs` as a two-operand sum.
fn sum_of(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    Expr::Sum(vec![lhs.into(), rhs.into()])
}

binary_op! {
    Add add => sum_of,
    Sub sub => Expr::difference,
    Mul mul => Expr::product,
    Div div => Expr::quotient,
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::negative(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::negative(self.clone())
    }
}
