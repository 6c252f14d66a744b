use ariadne::Fmt;
use symexpr_attrs::ErrorKind;
use symexpr_error::{ErrorKind, EXPR};

/// Formats a list of suggested names as help text, or returns `fallback` if there are none.
fn suggestion_help(kind: &str, suggestions: &[String], fallback: String) -> String {
    match suggestions {
        [] => fallback,
        [one] => format!("did you mean the `{}` {}?", one.fg(EXPR), kind),
        many => format!(
            "did you mean one of these {}s? {}",
            kind,
            many.iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// A value could not be normalized into an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot package `{}` into an expression", self.value),
    labels = ["while building this expression"],
    help = self.reason,
)]
pub struct InvalidOperand {
    /// The offending value, formatted.
    pub value: String,

    /// Why the value was rejected.
    pub reason: &'static str,
}

/// A sum was built without any operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a sum must have at least one operand",
    labels = ["this sum"],
)]
pub struct EmptySum;

/// The variable has no value in the bindings used for evaluation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not bound", self.name),
    labels = ["this variable"],
    help = suggestion_help(
        "variable",
        &self.suggestions,
        format!("to bind it, call: {}", format!("bindings.add_var(\"{}\", <value>)", self.name).fg(EXPR)),
    ),
)]
pub struct UnboundVariable {
    /// The symbol of the variable.
    pub name: String,

    /// Bound variables with a similar name, if any.
    pub suggestions: Vec<String>,
}

/// The function is not part of the function registry.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this function"],
    help = suggestion_help(
        "function",
        &self.suggestions,
        "see `funcs::names()` for the list of available functions".to_string(),
    ),
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// Registered functions with a similar name, if any.
    pub suggestions: Vec<String>,
}

/// Neither the base nor the exponent of a power is a literal number, so neither the power rule
/// nor the exponential rule applies.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot differentiate a power whose base and exponent are both non-literal",
    labels = ["this power"],
    help = "the power rule needs a numeric exponent, the exponential rule a numeric base",
    note = format!("base: `{}`, exponent: `{}`", self.base, self.exponent),
)]
pub struct UnsupportedDerivative {
    /// The base of the power, in display form.
    pub base: String,

    /// The exponent of the power, in display form.
    pub exponent: String,
}

/// The denominator of a quotient evaluated to zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this quotient"],
    help = "the denominator of this quotient evaluated to zero",
)]
pub struct DivisionByZero;

/// An operation evaluated to `NaN` or an infinity.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{} evaluated to a non-finite value ({})", self.operation, self.value),
    labels = ["this expression"],
    help = "the operation is undefined for its input, or the result is too large to represent",
)]
pub struct NonFiniteResult {
    /// The operation that produced the value, such as `power` or `sqrt`.
    pub operation: String,

    /// The value that was produced.
    pub value: f64,
}

/// Describes where the depth limit of an operation comes from.
fn max_depth_help(operation: &str, max_depth: usize) -> String {
    match operation {
        "evaluation" => format!(
            "evaluation allows a depth of {}, set with `Bindings::set_max_depth`",
            max_depth,
        ),
        _ => format!("{} allows a fixed depth of {} (`MAX_DEPTH`)", operation, max_depth),
    }
}

/// The expression is nested deeper than the limit of the operation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("maximum expression depth exceeded during {}", self.operation),
    labels = ["this expression"],
    help = max_depth_help(self.operation, self.max_depth),
)]
pub struct MaxDepthExceeded {
    /// The operation that gave up, one of `evaluation`, `differentiation` or `rendering`.
    pub operation: &'static str,

    /// The limit that was exceeded.
    pub max_depth: usize,
}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use pretty_assertions::assert_eq;
    use super::*;

    fn help_of(kind: MaxDepthExceeded) -> String {
        let mut buf = Vec::new();
        crate::error::Error::new(kind)
            .build_report("input", 0..1)
            .write(("input", Source::from("x")), &mut buf)
            .unwrap();
        let out = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        out.lines()
            .find_map(|line| line.split_once("Help: ").map(|(_, help)| help.to_string()))
            .unwrap()
    }

    #[test]
    fn depth_limit_help_names_its_source() {
        assert_eq!(
            help_of(MaxDepthExceeded { operation: "evaluation", max_depth: 9 }),
            "evaluation allows a depth of 9, set with `Bindings::set_max_depth`",
        );
        assert_eq!(
            help_of(MaxDepthExceeded { operation: "differentiation", max_depth: 2048 }),
            "differentiation allows a fixed depth of 2048 (`MAX_DEPTH`)",
        );
    }
}
