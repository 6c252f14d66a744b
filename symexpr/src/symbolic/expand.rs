use crate::Expr;
use tracing::{debug, trace};

impl Expr {
    /// Expands the expression by distributing products over sums.
    ///
    /// Children are expanded first. Then, if either side of a [`Expr::Product`] is a
    /// [`Expr::Sum`], the product is distributed over every term of that sum, checking the left
    /// side first, and each resulting product is expanded again:
    ///
    /// - `(a + b) * c` becomes `a * c + b * c`
    /// - `a * (b + c)` becomes `a * b + a * c`
    ///
    /// The distributed terms are collected into a new sum without flattening, so
    /// `(a + b) * (c + d)` becomes `(a * c + a * d) + (b * c + b * d)`. Only sums, products and
    /// function arguments are expanded; differences, quotients, powers and negations are returned
    /// unchanged.
    ///
    /// ```
    /// use symexpr::Expr;
    ///
    /// let x = Expr::var("x");
    /// let expr = (x.clone() + 1) * x;
    /// assert_eq!(
    ///     expr.expand().to_string(),
    ///     "Sum(Product(Variable(x),Variable(x)),Product(Number(1),Variable(x)))",
    /// );
    /// ```
    pub fn expand(&self) -> Expr {
        if !self.contains_sum() {
            return self.clone();
        }
        debug!(expr = %self, "expanding");
        expand(self)
    }
}

fn expand(expr: &Expr) -> Expr {
    match expr {
        Expr::Sum(terms) => Expr::Sum(terms.iter().map(expand).collect()),
        Expr::Apply(name, arg) => Expr::apply(name.as_str(), expand(arg)),
        Expr::Product(lhs, rhs) => {
            let lhs = expand(lhs);
            let rhs = expand(rhs);
            match (lhs, rhs) {
                (Expr::Sum(terms), rhs) => {
                    trace!(%rhs, terms = terms.len(), "distributing from the right");
                    Expr::Sum(terms.into_iter()
                        .map(|term| expand(&Expr::product(term, &rhs)))
                        .collect())
                },
                (lhs, Expr::Sum(terms)) => {
                    trace!(%lhs, terms = terms.len(), "distributing from the left");
                    Expr::Sum(terms.into_iter()
                        .map(|term| expand(&Expr::product(&lhs, term)))
                        .collect())
                },
                (lhs, rhs) => Expr::product(lhs, rhs),
            }
        },
        Expr::Number(_)
            | Expr::Variable(_)
            | Expr::Difference(..)
            | Expr::Quotient(..)
            | Expr::Power(..)
            | Expr::Negative(_) => expr.clone(),
    }
}
