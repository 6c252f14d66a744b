//! Symbolic derivatives of the functions in the [function registry](crate::funcs).

use crate::{error::Error, funcs, Expr};
use super::derive;
use tracing::trace;

/// Applies the chain rule to `name(arg)`: the derivative of the argument times the function's
/// derivative template, with the argument substituted for the placeholder.
pub(super) fn function_derivative(
    name: &str,
    arg: &Expr,
    var: &str,
    depth: usize,
) -> Result<Expr, Error> {
    let entry = funcs::lookup(name)?;
    let darg = derive(arg, var, depth + 1).map_err(|err| err.within(0))?;
    let outer = entry.derivative.substitute(funcs::PLACEHOLDER, arg);
    trace!(function = name, %outer, "chain rule");
    Ok(Expr::product(darg, outer))
}
