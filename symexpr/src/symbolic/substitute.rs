use crate::Expr;

impl Expr {
    /// Returns a copy of the expression with every occurrence of the variable `var` replaced by
    /// a copy of `replacement`.
    ///
    /// The replacement itself is not searched, so substituting `x` with `x + 1` replaces each `x`
    /// exactly once.
    ///
    /// ```
    /// use symexpr::Expr;
    ///
    /// let x = Expr::var("x");
    /// let expr = (x.clone() * 2).substitute("x", &(x + 1));
    /// assert_eq!(
    ///     expr.to_string(),
    ///     "Product(Sum(Variable(x),Number(1)),Number(2))",
    /// );
    /// ```
    pub fn substitute(&self, var: &str, replacement: &Expr) -> Expr {
        let sub = |expr: &Expr| Box::new(expr.substitute(var, replacement));
        match self {
            Self::Number(_) => self.clone(),
            Self::Variable(symbol) if symbol == var => replacement.clone(),
            Self::Variable(_) => self.clone(),
            Self::Sum(terms) => Self::Sum(
                terms.iter().map(|term| term.substitute(var, replacement)).collect(),
            ),
            Self::Difference(lhs, rhs) => Self::Difference(sub(lhs), sub(rhs)),
            Self::Product(lhs, rhs) => Self::Product(sub(lhs), sub(rhs)),
            Self::Quotient(lhs, rhs) => Self::Quotient(sub(lhs), sub(rhs)),
            Self::Power(lhs, rhs) => Self::Power(sub(lhs), sub(rhs)),
            Self::Negative(inner) => Self::Negative(sub(inner)),
            Self::Apply(name, arg) => Self::Apply(name.clone(), sub(arg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let x = Expr::var("x");
        let expr = Expr::sum([x.clone(), x.clone().pow(2), x.clone().sin()]).unwrap();
        let result = expr.substitute("x", &Expr::var("t"));
        assert_eq!(
            result.to_string(),
            "Sum(Variable(t),Power(Variable(t),Number(2)),Apply(Function(\"sin\"),Variable(t)))",
        );
        assert!(!result.contains("x"));
    }

    #[test]
    fn absent_variable_leaves_tree_unchanged() {
        let expr = Expr::quotient(Expr::var("y") - 3, Expr::negative(Expr::var("z").ln()));
        let result = expr.substitute("x", &Expr::number(7.0));
        assert_eq!(result.to_string(), expr.to_string());
    }

    #[test]
    fn replacement_is_not_searched() {
        let x = Expr::var("x");
        let result = x.substitute("x", &(x.clone() * x.clone()));
        assert_eq!(result.to_string(), "Product(Variable(x),Variable(x))");
    }

    #[test]
    fn numbers_are_unaffected() {
        let expr = Expr::number(2.0);
        assert_eq!(expr.substitute("x", &Expr::var("y")), expr);
    }
}
