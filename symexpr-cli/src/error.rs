use ariadne::Source;
use std::num::ParseFloatError;
use symexpr::{error::Error as ExprError, source::SourceOptions, Expr};
use thiserror::Error;

/// Errors in a `NAME=VALUE` binding given on the command line.
#[derive(Debug, Error, PartialEq)]
pub enum BindingError {
    #[error("expected NAME=VALUE")]
    MissingEquals,

    #[error("the variable name is empty")]
    EmptyName,

    #[error("invalid value `{0}`: {1}")]
    InvalidValue(String, #[source] ParseFloatError),
}

/// Report an error raised by an operation on `expr` to stderr.
///
/// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
/// implementation, so we can only use its `eprint` method to print to stderr.
pub fn report_to_stderr(expr: &Expr, err: &ExprError, options: SourceOptions) {
    let (src, report) = expr.build_report(err, "input", options);
    if let Err(io_err) = report.eprint(("input", Source::from(src))) {
        tracing::error!("failed to print report: {}", io_err);
    }
}
