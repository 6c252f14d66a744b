use crate::{
    error::{
        kind::{DivisionByZero, EmptySum, MaxDepthExceeded, NonFiniteResult, UnboundVariable},
        Error,
    },
    funcs,
    Expr,
};
use super::bindings::Bindings;
use tracing::debug;

impl Expr {
    /// Evaluates the expression to a number, using the given bindings for its variables.
    ///
    /// Evaluation fails if a variable is not bound, if a function is not registered, if a
    /// denominator is zero, or if any node evaluates to `NaN` or an infinity. The returned error
    /// records the path to the node that failed.
    ///
    /// ```
    /// use symexpr::{numerical::Bindings, Expr};
    ///
    /// let x = Expr::var("x");
    /// let expr = (x.clone() + 1) / x.sqrt();
    /// assert_eq!(expr.evaluate(&Bindings::from([("x", 4.0)])).unwrap(), 2.5);
    /// ```
    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64, Error> {
        debug!(expr = %self, "evaluating");
        eval(self, bindings, 1)
    }
}

/// Returns `value` if it is finite, or a [`NonFiniteResult`] error naming `operation`.
fn finite(operation: &str, value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::new(NonFiniteResult { operation: operation.to_string(), value }))
    }
}

/// Evaluates `expr`, which is at the given depth of the tree being evaluated.
fn eval(expr: &Expr, bindings: &Bindings, depth: usize) -> Result<f64, Error> {
    if depth > bindings.max_depth() {
        return Err(Error::new(MaxDepthExceeded {
            operation: "evaluation",
            max_depth: bindings.max_depth(),
        }));
    }

    let child = |index: usize, child: &Expr| {
        eval(child, bindings, depth + 1).map_err(|err| err.within(index))
    };

    match expr {
        Expr::Number(n) => finite("number", *n),
        Expr::Variable(name) => {
            let value = bindings.get_var(name).ok_or_else(|| {
                let mut suggestions = bindings.get_similar_vars(name)
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                suggestions.sort();
                Error::new(UnboundVariable { name: name.clone(), suggestions })
            })?;
            finite(name, value)
        },
        Expr::Sum(terms) => {
            if terms.is_empty() {
                return Err(Error::new(EmptySum));
            }
            let mut sum = 0.0;
            for (i, term) in terms.iter().enumerate() {
                sum += child(i, term)?;
            }
            finite("sum", sum)
        },
        Expr::Difference(lhs, rhs) => finite("difference", child(0, lhs)? - child(1, rhs)?),
        Expr::Product(lhs, rhs) => finite("product", child(0, lhs)? * child(1, rhs)?),
        Expr::Quotient(numerator, denominator) => {
            let numerator = child(0, numerator)?;
            let denominator = child(1, denominator)?;
            if denominator == 0.0 {
                return Err(Error::new(DivisionByZero));
            }
            finite("quotient", numerator / denominator)
        },
        Expr::Power(base, exponent) => finite("power", child(0, base)?.powf(child(1, exponent)?)),
        Expr::Negative(inner) => Ok(-child(0, inner)?),
        Expr::Apply(name, arg) => {
            let entry = funcs::lookup(name)?;
            finite(name, entry.builtin.eval(child(0, arg)?))
        },
    }
}
