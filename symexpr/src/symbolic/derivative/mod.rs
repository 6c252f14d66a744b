use crate::{
    error::{
        kind::{EmptySum, MaxDepthExceeded, UnsupportedDerivative},
        Error,
    },
    numerical::MAX_DEPTH,
    Expr,
};
use tracing::debug;

mod function;

impl Expr {
    /// Returns the derivative of the expression with respect to the variable `var`.
    ///
    /// The derivative is built from a fixed table of rules and is **not** simplified, so
    /// `d/dx (3x)` is `Product(Number(3),Number(1))` rather than `Number(3)`.
    ///
    /// Powers can only be differentiated when either the exponent (power rule) or the base
    /// (exponential rule) is a literal number. Any other power fails with
    /// [`UnsupportedDerivative`].
    ///
    /// ```
    /// use symexpr::{numerical::Bindings, Expr};
    ///
    /// let x = Expr::var("x");
    /// let derivative = x.clone().pow(3).derivative("x").unwrap();
    /// assert_eq!(derivative.evaluate(&Bindings::from([("x", 2.0)])).unwrap(), 12.0);
    /// ```
    pub fn derivative(&self, var: &str) -> Result<Expr, Error> {
        debug!(expr = %self, var, "differentiating");
        derive(self, var, 1)
    }
}

/// Differentiates `expr`, which is at the given depth of the tree being differentiated.
fn derive(expr: &Expr, var: &str, depth: usize) -> Result<Expr, Error> {
    if depth > MAX_DEPTH {
        return Err(Error::new(MaxDepthExceeded { operation: "differentiation", max_depth: MAX_DEPTH }));
    }

    let d = |index: usize, child: &Expr| {
        derive(child, var, depth + 1).map_err(|err| err.within(index))
    };

    Ok(match expr {
        Expr::Number(_) => Expr::Number(0.0),
        Expr::Variable(symbol) => Expr::Number(if symbol == var { 1.0 } else { 0.0 }),

        // (f + g)' = f' + g'
        Expr::Sum(terms) => {
            if terms.is_empty() {
                return Err(Error::new(EmptySum));
            }
            Expr::Sum(terms.iter()
                .enumerate()
                .map(|(i, term)| d(i, term))
                .collect::<Result<_, _>>()?)
        },

        // (f - g)' = f' - g'
        Expr::Difference(lhs, rhs) => Expr::difference(d(0, lhs)?, d(1, rhs)?),

        // (fg)' = fg' + f'g, dropping a term whose factor is constant in `var`
        Expr::Product(lhs, rhs) => {
            if !lhs.contains(var) {
                Expr::product(&**lhs, d(1, rhs)?)
            } else if !rhs.contains(var) {
                Expr::product(d(0, lhs)?, &**rhs)
            } else {
                Expr::Sum(vec![
                    Expr::product(&**lhs, d(1, rhs)?),
                    Expr::product(d(0, lhs)?, &**rhs),
                ])
            }
        },

        // (f / g)' = (f'g - fg') / g^2
        Expr::Quotient(numerator, denominator) => Expr::quotient(
            Expr::difference(
                Expr::product(d(0, numerator)?, &**denominator),
                Expr::product(&**numerator, d(1, denominator)?),
            ),
            Expr::power(&**denominator, 2),
        ),

        Expr::Power(base, exponent) => match (&**base, &**exponent) {
            // (f^n)' = n f^(n - 1) f'
            (_, Expr::Number(n)) => Expr::product(
                Expr::product(*n, Expr::power(&**base, *n - 1.0)),
                d(0, base)?,
            ),
            // (b^f)' = b^f ln(b) f'
            (Expr::Number(b), _) => Expr::product(
                Expr::product(expr, Expr::number(*b).ln()),
                d(1, exponent)?,
            ),
            _ => return Err(Error::new(UnsupportedDerivative {
                base: base.to_string(),
                exponent: exponent.to_string(),
            })),
        },

        Expr::Negative(inner) => Expr::negative(d(0, inner)?),
        Expr::Apply(name, arg) => function::function_derivative(name, arg, var, depth)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::{error::kind::UnknownFunction, numerical::Bindings};
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn y() -> Expr {
        Expr::var("y")
    }

    /// Evaluates the expression with `x` bound to the given value.
    fn eval_x(expr: &Expr, x: f64) -> f64 {
        expr.evaluate(&Bindings::from([("x", x), ("y", 0.75)])).unwrap()
    }

    /// Approximates the derivative of the expression with respect to `x` with a central finite
    /// difference.
    fn finite_difference(expr: &Expr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(expr, x + DX) - eval_x(expr, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(expr: Expr, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 1e-4;

        let symbolic = expr.derivative("x").unwrap();
        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);
            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "For \"{expr}\" at x={point}, symbolically computed derivative was {symbolically_computed} but numerically computed derivative was {numerically_computed}, which was out of tolerance {TOL}",
            );
        }
    }

    #[test]
    fn constants_and_variables() {
        assert_eq!(Expr::number(5.0).derivative("x").unwrap(), Expr::Number(0.0));
        assert_eq!(x().derivative("x").unwrap(), Expr::Number(1.0));
        assert_eq!(y().derivative("x").unwrap(), Expr::Number(0.0));
    }

    #[test]
    fn result_is_not_simplified() {
        let derivative = (3 * x()).derivative("x").unwrap();
        assert_eq!(derivative.to_string(), "Product(Number(3),Number(1))");
    }

    #[test]
    fn linearity() {
        let a = x().pow(2);
        let b = x().sin();
        let sum = Expr::sum([a.clone(), b.clone()]).unwrap().derivative("x").unwrap();
        let separate = Expr::sum([a.derivative("x").unwrap(), b.derivative("x").unwrap()]).unwrap();
        for point in [-2.0, 0.0, 0.5, 3.0] {
            assert_eq!(eval_x(&sum, point), eval_x(&separate, point));
        }
    }

    #[test]
    fn product_rule() {
        let derivative = (x() * x()).derivative("x").unwrap();
        assert_eq!(
            derivative.to_string(),
            "Sum(Product(Variable(x),Number(1)),Product(Number(1),Variable(x)))",
        );
        assert_eq!(eval_x(&derivative, 3.0), 6.0);
    }

    #[test]
    fn product_with_constant_factor() {
        let derivative = (y() * x().pow(2)).derivative("x").unwrap();
        assert_eq!(
            derivative.to_string(),
            "Product(Variable(y),Product(Product(Number(2),Power(Variable(x),Number(1))),Number(1)))",
        );
        let derivative = (x().sin() * y()).derivative("x").unwrap();
        assert!(matches!(derivative, Expr::Product(_, ref rhs) if **rhs == y()));
    }

    #[test]
    fn power_rule() {
        let derivative = x().pow(3).derivative("x").unwrap();
        assert_eq!(
            derivative.to_string(),
            "Product(Product(Number(3),Power(Variable(x),Number(2))),Number(1))",
        );
        assert_eq!(eval_x(&derivative, 2.0), 12.0);
        test_for_function(x().pow(2) + x() + 1, [0., 1., 2., 5., 8.]);
    }

    #[test]
    fn exponential_rule() {
        let derivative = Expr::power(2, x()).derivative("x").unwrap();
        assert_eq!(
            derivative.to_string(),
            "Product(Product(Power(Number(2),Variable(x)),Apply(Function(\"ln\"),Number(2))),Number(1))",
        );
        test_for_function(Expr::power(2, x() * x()), [-1.0, 0.0, 0.5, 1.5]);
    }

    #[test]
    fn power_rule_wins_when_both_are_literal() {
        let derivative = Expr::power(2, 3).derivative("x").unwrap();
        assert!(matches!(derivative, Expr::Product(ref lhs, _) if matches!(**lhs, Expr::Product(..))));
        assert_eq!(eval_x(&derivative, 1.0), 0.0);
    }

    #[test]
    fn unsupported_power() {
        let err = x().pow(y()).derivative("x").unwrap_err();
        let kind = err.downcast_ref::<UnsupportedDerivative>().unwrap();
        assert_eq!(kind.base, "Variable(x)");
        assert_eq!(kind.exponent, "Variable(y)");
        assert!(err.path.is_empty());
    }

    #[test]
    fn quotient_rule() {
        test_for_function((x() + 1) / (x() * x() + 2), [-3.0, -0.5, 0.0, 1.0, 4.0]);
        test_for_function(Expr::quotient(1, x()), [0.5, 1.0, 2.0]);
    }

    #[test]
    fn negation_and_difference() {
        test_for_function(-(x().pow(3)) - 4 * x(), [-2.0, 0.0, 1.0]);
    }

    #[test]
    fn chain_rule() {
        let derivative = (2 * x()).sin().derivative("x").unwrap();
        assert_eq!(
            derivative.to_string(),
            "Product(Product(Number(2),Number(1)),\
            Apply(Function(\"cos\"),Product(Number(2),Variable(x))))",
        );

        test_for_function(x().pow(2).sin(), [-1.0, 0.0, 0.3, 2.0]);
        test_for_function((3 * x()).cos(), [-1.0, 0.0, 0.3, 2.0]);
        test_for_function((x() * x() + 1).ln(), [-2.0, 0.0, 1.0, 3.0]);
        test_for_function((x() + 4).sqrt(), [-3.0, 0.0, 2.5, 12.0]);
        test_for_function(x().cos().sin().sqrt(), [0.1, 0.5, 1.0]);
    }

    #[test]
    fn partial_derivative() {
        let expr = x() * y() + y().pow(2);
        let derivative = expr.derivative("y").unwrap();
        let value = derivative.evaluate(&Bindings::from([("x", 2.0), ("y", 5.0)])).unwrap();
        assert_eq!(value, 12.0);
    }

    #[test]
    fn unknown_function() {
        let expr = x() + Expr::apply("tan", x());
        let err = expr.derivative("x").unwrap_err();
        assert_eq!(err.downcast_ref::<UnknownFunction>().unwrap().name, "tan");
        assert_eq!(err.path, [1]);
    }

    #[test]
    fn max_depth() {
        // test threads have a small stack
        std::thread::Builder::new()
            .stack_size(1 << 26)
            .spawn(|| {
                let mut expr = x();
                for _ in 0..MAX_DEPTH {
                    expr = Expr::negative(expr);
                }
                let err = expr.derivative("x").unwrap_err();
                assert_eq!(
                    err.downcast_ref::<MaxDepthExceeded>().unwrap().operation,
                    "differentiation",
                );
                assert_eq!(err.path.len(), MAX_DEPTH);
            })
            .unwrap()
            .join()
            .unwrap();
    }
}
