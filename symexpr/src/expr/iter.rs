use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`]. It keeps its own stack, so it can walk
/// trees of any depth.
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Number(_) | Expr::Variable(_) => return self.visit(),
                Expr::Sum(terms) => {
                    if terms.is_empty() || self.is_last_visited(&terms[terms.len() - 1]) {
                        return self.visit();
                    }
                    for term in terms.iter().rev() {
                        self.stack.push(term);
                    }
                },
                Expr::Difference(lhs, rhs)
                    | Expr::Product(lhs, rhs)
                    | Expr::Quotient(lhs, rhs)
                    | Expr::Power(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
                Expr::Negative(inner) | Expr::Apply(_, inner) => {
                    if self.is_last_visited(inner) {
                        return self.visit();
                    }
                    self.stack.push(inner);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        let expr = Expr::product(
            Expr::sum([Expr::var("a"), Expr::var("b")]).unwrap(),
            Expr::negative(Expr::var("c")),
        );
        let visited = expr.post_order_iter()
            .map(|expr| match expr {
                Expr::Variable(symbol) => symbol.clone(),
                Expr::Sum(_) => "+".to_string(),
                Expr::Negative(_) => "neg".to_string(),
                Expr::Product(..) => "*".to_string(),
                other => unreachable!("unexpected node {}", other),
            })
            .collect::<Vec<_>>();
        assert_eq!(visited, ["a", "b", "+", "c", "neg", "*"]);
    }

    #[test]
    fn single_leaf() {
        let expr = Expr::number(1.0);
        assert_eq!(expr.post_order_iter().count(), 1);
    }
}
