//! Rendering expressions as source code.
//!
//! [`Expr::to_source`] turns an expression into a textual numeric expression that a generic
//! evaluator can run, such as the [`evalexpr`](https://docs.rs/evalexpr) crate or Python. Every
//! sub-expression is wrapped in parentheses, so the result never depends on the precedence rules
//! of the target language:
//!
//! ```
//! use symexpr::{source::{Dialect, SourceOptionsBuilder}, Expr};
//!
//! let x = Expr::var("x");
//! let expr = Expr::sum([Expr::number(2.0), x.clone() * 3, x.pow(2).sin()]).unwrap();
//! assert_eq!(
//!     expr.to_source(Default::default()).unwrap(),
//!     "(2.0) + ((x) * (3.0)) + (math::sin((x) ^ (2.0)))",
//! );
//!
//! let python = SourceOptionsBuilder::new().dialect(Dialect::Python).build();
//! assert_eq!(
//!     expr.to_source(python).unwrap(),
//!     "(2.0) + ((x) * (3.0)) + (math.sin((x) ** (2.0)))",
//! );
//! ```
//!
//! The same renderer is used to build error reports. [`Expr::build_report`] renders the
//! expression that an operation failed on, and points the report at the node the error
//! originated from.

mod options;

pub use options::{Dialect, SourceOptions, SourceOptionsBuilder};

use ariadne::Report;
use crate::{
    error::{
        kind::{EmptySum, InvalidOperand, MaxDepthExceeded},
        Error,
    },
    funcs,
    numerical::MAX_DEPTH,
    Expr,
};
use std::ops::Range;

impl Expr {
    /// Renders the expression as source code in the dialect given by `options`.
    ///
    /// Fails with [`UnknownFunction`](crate::error::kind::UnknownFunction) if the expression
    /// applies a function that is not registered, with [`EmptySum`] if it contains a sum without
    /// operands, and with [`InvalidOperand`] if it contains a non-finite number.
    pub fn to_source(&self, options: SourceOptions) -> Result<String, Error> {
        let mut renderer = Renderer::new(options, false);
        renderer.render(self, None, 1)?;
        Ok(renderer.out)
    }

    /// Builds a report for an error returned by an operation on this expression.
    ///
    /// The expression is rendered as source code, writing unknown functions and invalid numbers
    /// as they are. Nodes nested deeper than [`MAX_DEPTH`] are written as `…`. The report's label
    /// points at the node identified by the error's path, at the `…` if that node is hidden
    /// behind it, or at the whole source if the path does not lead to a node of this expression. Returns the
    /// rendered source together with the report, which must be printed against that source.
    ///
    /// ```
    /// use symexpr::{numerical::Bindings, Expr};
    ///
    /// let expr = Expr::var("x") + Expr::var("y");
    /// let err = expr.evaluate(&Bindings::from([("x", 1.0)])).unwrap_err();
    ///
    /// let (src, report) = expr.build_report(&err, "input", Default::default());
    /// assert_eq!(src, "(x) + (y)");
    /// report.eprint(("input", ariadne::Source::from(src))).unwrap();
    /// ```
    pub fn build_report<'a>(
        &self,
        err: &'a Error,
        src_id: &'a str,
        options: SourceOptions,
    ) -> (String, Report<'a, (&'a str, Range<usize>)>) {
        let path = err.path.iter().copied().collect::<Vec<_>>();
        let (src, span) = self.render_with_span(options, &path);
        let span = match span {
            Some(span) => char_span(&src, span),
            None => 0..src.chars().count(),
        };
        let report = err.build_report(src_id, span);
        (src, report)
    }

    /// Renders the expression leniently, returning the source and the byte span of the node at
    /// the given path, if there is one.
    pub(crate) fn render_with_span(
        &self,
        options: SourceOptions,
        path: &[usize],
    ) -> (String, Option<Range<usize>>) {
        let mut renderer = Renderer::new(options, true);
        // lenient rendering does not fail
        let _ = renderer.render(self, Some(path), 1);
        (renderer.out, renderer.span)
    }
}

/// Converts a byte span of `src` into the character span used by [`ariadne`].
fn char_span(src: &str, span: Range<usize>) -> Range<usize> {
    let start = src[..span.start].chars().count();
    start..start + src[span].chars().count()
}

/// Writes the source code of an expression.
struct Renderer {
    options: SourceOptions,

    /// When true, invalid nodes are written as they are instead of failing.
    lenient: bool,

    out: String,

    /// The byte span of the node being searched for, once it has been written.
    span: Option<Range<usize>>,
}

impl Renderer {
    fn new(options: SourceOptions, lenient: bool) -> Self {
        Self { options, lenient, out: String::new(), span: None }
    }

    /// Writes `expr`. `target` is the remaining path to the node whose span is recorded, if that
    /// node is `expr` or one of its descendants.
    fn render(&mut self, expr: &Expr, target: Option<&[usize]>, depth: usize) -> Result<(), Error> {
        let start = self.out.len();
        if depth > MAX_DEPTH {
            if !self.lenient {
                return Err(Error::new(MaxDepthExceeded {
                    operation: "rendering",
                    max_depth: MAX_DEPTH,
                }));
            }
            self.out.push('…');
            if target.is_some() {
                self.span = Some(start..self.out.len());
            }
            return Ok(());
        }

        self.render_node(expr, target, depth)?;
        if matches!(target, Some([])) {
            self.span = Some(start..self.out.len());
        }
        Ok(())
    }

    /// Writes the `index`-th child of the node at the given depth, wrapped in parentheses.
    fn child(
        &mut self,
        index: usize,
        child: &Expr,
        target: Option<&[usize]>,
        depth: usize,
    ) -> Result<(), Error> {
        let target = target.and_then(|path| match path.split_first() {
            Some((&first, rest)) if first == index => Some(rest),
            _ => None,
        });
        self.out.push('(');
        self.render(child, target, depth + 1).map_err(|err| err.within(index))?;
        self.out.push(')');
        Ok(())
    }

    fn binary(
        &mut self,
        lhs: &Expr,
        op: &str,
        rhs: &Expr,
        target: Option<&[usize]>,
        depth: usize,
    ) -> Result<(), Error> {
        self.child(0, lhs, target, depth)?;
        self.out.push(' ');
        self.out.push_str(op);
        self.out.push(' ');
        self.child(1, rhs, target, depth)
    }

    fn render_node(&mut self, expr: &Expr, target: Option<&[usize]>, depth: usize) -> Result<(), Error> {
        match expr {
            Expr::Number(n) => {
                if !n.is_finite() && !self.lenient {
                    return Err(Error::new(InvalidOperand {
                        value: n.to_string(),
                        reason: "literal numbers must be finite",
                    }));
                }
                self.number(*n);
            },
            Expr::Variable(symbol) => self.out.push_str(symbol),
            Expr::Sum(terms) => {
                if terms.is_empty() {
                    if !self.lenient {
                        return Err(Error::new(EmptySum));
                    }
                    self.out.push_str("()");
                }
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(" + ");
                    }
                    self.child(i, term, target, depth)?;
                }
            },
            Expr::Difference(lhs, rhs) => self.binary(lhs, "-", rhs, target, depth)?,
            Expr::Product(lhs, rhs) => self.binary(lhs, "*", rhs, target, depth)?,
            Expr::Quotient(lhs, rhs) => self.binary(lhs, "/", rhs, target, depth)?,
            Expr::Power(lhs, rhs) => {
                let op = self.options.dialect.power_operator();
                self.binary(lhs, op, rhs, target, depth)?;
            },
            Expr::Negative(inner) => {
                self.out.push('-');
                self.child(0, inner, target, depth)?;
            },
            Expr::Apply(name, arg) => {
                match funcs::lookup(name) {
                    Ok(entry) => self.out.push_str(entry.builtin.call_name(self.options.dialect)),
                    Err(_) if self.lenient => self.out.push_str(name),
                    Err(err) => return Err(err),
                }
                self.child(0, arg, target, depth)?;
            },
        }
        Ok(())
    }

    /// Writes a number, always with a decimal point. Negative numbers are parenthesized.
    fn number(&mut self, n: f64) {
        let mut digits = match self.options.precision {
            Some(precision) => format!("{:.*}", precision, n.abs()),
            None => n.abs().to_string(),
        };
        if n.is_finite() && !digits.contains('.') {
            digits.push_str(".0");
        }

        if n.is_sign_negative() {
            self.out.push_str("(-");
            self.out.push_str(&digits);
            self.out.push(')');
        } else {
            self.out.push_str(&digits);
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use ariadne::Source;
    use crate::{
        error::kind::{DivisionByZero, UnboundVariable, UnknownFunction},
        numerical::Bindings,
    };
    use evalexpr::{eval_number_with_context, ContextWithMutableVariables, HashMapContext, Value};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn python() -> SourceOptions {
        SourceOptionsBuilder::new().dialect(Dialect::Python).build()
    }

    /// Evaluates the source code of `expr` with the `evalexpr` crate.
    fn evalexpr_at(expr: &Expr, vars: &[(&str, f64)]) -> f64 {
        let src = expr.to_source(Default::default()).unwrap();
        let mut context = HashMapContext::new();
        for (name, value) in vars {
            context.set_value(name.to_string(), Value::Float(*value)).unwrap();
        }
        eval_number_with_context(&src, &context).unwrap()
    }

    fn report_text(expr: &Expr, err: &Error) -> String {
        let (src, report) = expr.build_report(err, "input", Default::default());
        let mut buf = Vec::new();
        report.write(("input", Source::from(src)), &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn fully_parenthesized() {
        let expr = Expr::sum([Expr::number(2.0), Expr::product(x(), 3)]).unwrap();
        assert_eq!(expr.to_source(Default::default()).unwrap(), "(2.0) + ((x) * (3.0))");

        let expr = Expr::quotient(-x(), Expr::difference(x(), 0.5));
        assert_eq!(expr.to_source(Default::default()).unwrap(), "(-(x)) / ((x) - (0.5))");
    }

    #[test]
    fn numbers() {
        assert_eq!(Expr::number(3.0).to_source(Default::default()).unwrap(), "3.0");
        assert_eq!(Expr::number(-3.0).to_source(Default::default()).unwrap(), "(-3.0)");
        assert_eq!(Expr::number(1e21).to_source(Default::default()).unwrap(), "1000000000000000000000.0");

        let pi = Expr::number(std::f64::consts::PI);
        let options = SourceOptionsBuilder::new().precision(3).build();
        assert_eq!(pi.to_source(options).unwrap(), "3.142");
        let options = SourceOptionsBuilder::new().precision(0).build();
        assert_eq!(pi.to_source(options).unwrap(), "3.0");
    }

    #[test]
    fn dialects() {
        let expr = Expr::sum([x().pow(2), x().ln(), x().cos(), x().sqrt()]).unwrap();
        assert_eq!(
            expr.to_source(Default::default()).unwrap(),
            "((x) ^ (2.0)) + (math::ln(x)) + (math::cos(x)) + (math::sqrt(x))",
        );
        assert_eq!(
            expr.to_source(python()).unwrap(),
            "((x) ** (2.0)) + (math.log(x)) + (math.cos(x)) + (math.sqrt(x))",
        );
    }

    #[test]
    fn evalexpr_round_trip() {
        let expr = Expr::sum([Expr::number(2.0), Expr::product(x(), 3)]).unwrap();
        assert_eq!(evalexpr_at(&expr, &[("x", 4.0)]), 14.0);
    }

    #[test]
    fn evalexpr_agrees_with_evaluate() {
        let mut rng = StdRng::seed_from_u64(42);
        let y = Expr::var("y");
        let exprs = [
            (x().pow(3) - 2 * x() + 1) / (x() * x() + 1),
            Expr::power(2, x()) * y.clone().cos() - (-x()).pow(2),
            (x() * x() + y.clone().pow(2) + 1).sqrt().ln(),
            x().pow(2).sin() / (y.clone() + 5),
        ];
        for expr in exprs {
            let derivative = expr.derivative("x").unwrap();
            for _ in 0..10 {
                let vars = [("x", rng.gen_range(-2.0..2.0)), ("y", rng.gen_range(-2.0..2.0))];
                let bindings = Bindings::from(vars);
                assert_float_absolute_eq!(
                    evalexpr_at(&expr, &vars),
                    expr.evaluate(&bindings).unwrap(),
                    1e-9
                );
                assert_float_absolute_eq!(
                    evalexpr_at(&derivative, &vars),
                    derivative.evaluate(&bindings).unwrap(),
                    1e-9
                );
            }
        }
    }

    #[test]
    fn unknown_function() {
        let expr = x() + Expr::apply("tan", x());
        let err = expr.to_source(Default::default()).unwrap_err();
        assert_eq!(err.downcast_ref::<UnknownFunction>().unwrap().name, "tan");
        assert_eq!(err.path, [1]);
    }

    #[test]
    fn invalid_trees() {
        let err = Expr::negative(Expr::Sum(vec![])).to_source(Default::default()).unwrap_err();
        assert!(err.is::<EmptySum>());

        let err = (x() * f64::INFINITY).to_source(Default::default()).unwrap_err();
        assert!(err.is::<InvalidOperand>());
        assert_eq!(err.path, [1]);
    }

    #[test]
    fn span_of_failing_node() {
        let expr = Expr::sum([Expr::number(1.0), Expr::quotient(1, x() - 2)]).unwrap();
        let err = expr.evaluate(&Bindings::from([("x", 2.0)])).unwrap_err();
        assert!(err.is::<DivisionByZero>());

        let (src, span) = expr.render_with_span(Default::default(), &[1]);
        assert_eq!(src, "(1.0) + ((1.0) / ((x) - (2.0)))");
        assert_eq!(&src[span.unwrap()], "(1.0) / ((x) - (2.0))");

        let (_, span) = expr.render_with_span(Default::default(), &[]);
        assert_eq!(span, Some(0..src.len()));

        let (_, span) = expr.render_with_span(Default::default(), &[5]);
        assert_eq!(span, None);
    }

    #[test]
    fn lenient_rendering_of_unknown_function() {
        let expr = Expr::apply("tan", x() * 2);
        let (src, span) = expr.render_with_span(Default::default(), &[0, 0]);
        assert_eq!(src, "tan((x) * (2.0))");
        assert_eq!(&src[span.unwrap()], "x");
    }

    #[test]
    fn lenient_rendering_elides_deep_nodes() {
        // test threads have a small stack
        std::thread::Builder::new()
            .stack_size(1 << 26)
            .spawn(|| {
                let mut expr = x();
                for _ in 0..60_000 {
                    expr = Expr::negative(expr);
                }

                let err = expr.evaluate(&Bindings::from([("x", 1.0)])).unwrap_err();
                assert!(err.is::<MaxDepthExceeded>());
                let path = err.path.iter().copied().collect::<Vec<_>>();
                let (src, span) = expr.render_with_span(Default::default(), &path);
                assert_eq!(src, format!("{}…{}", "-(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH)));
                assert_eq!(&src[span.unwrap()], "…");

                let out = report_text(&expr, &err);
                assert!(out.contains("maximum expression depth exceeded during evaluation"));

                let err = expr.to_source(Default::default()).unwrap_err();
                assert_eq!(err.downcast_ref::<MaxDepthExceeded>().unwrap().operation, "rendering");

                // dropping is recursive; unwind the tree manually
                while let Expr::Negative(inner) = expr {
                    expr = *inner;
                }
            })
            .unwrap()
            .join()
            .unwrap();
    }

    #[test]
    fn char_spans() {
        let src = "(θ) + (y)";
        let start = src.find('y').unwrap();
        assert_eq!(char_span(src, start..start + 1), 7..8);
    }

    #[test]
    fn report_points_at_node() {
        let expr = Expr::product(x() + 1, Expr::var("zeta").sin());
        let err = expr.evaluate(&Bindings::from([("x", 1.0), ("zetas", 2.0)])).unwrap_err();
        assert!(err.is::<UnboundVariable>());

        let out = report_text(&expr, &err);
        assert!(out.contains("`zeta` is not bound"));
        assert!(out.contains("this variable"));
        assert!(out.contains("did you mean the `zetas` variable?"));
        assert!(out.contains("((x) + (1.0)) * (math::sin(zeta))"));
    }

    #[test]
    fn report_outlives_expression() {
        let err = Expr::var("y").evaluate(&Bindings::new()).unwrap_err();
        let (src, report) = {
            let expr = Expr::var("y") * 2;
            expr.build_report(&err, "input", Default::default())
        };

        let mut buf = Vec::new();
        report.write(("input", Source::from(src)), &mut buf).unwrap();
        let out = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(out.contains("`y` is not bound"));
        assert!(out.contains("(y) * (2.0)"));
    }

    #[test]
    fn report_for_unknown_function() {
        let expr = Expr::apply("sine", x());
        let err = expr.derivative("x").unwrap_err();
        let out = report_text(&expr, &err);
        assert!(out.contains("the `sine` function does not exist"));
        assert!(out.contains("did you mean the `sin` function?"));
        assert!(out.contains("sine(x)"));
    }
}
