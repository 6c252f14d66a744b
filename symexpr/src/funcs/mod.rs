//! The function registry: every function that can appear in an [`Expr::Apply`] node.
//!
//! The registry is fixed. It is built once, the first time it is used, and never changes
//! afterwards, so it can be read from any number of threads without synchronization.
//!
//! Each function is implemented as a unit `struct` with an associated `eval_static` method, which
//! can be used directly from Rust code. The [`Builtin`] trait exposes the same function to the
//! rest of the crate by name, together with its derivative template and its name in each source
//! [`Dialect`].
//!
//! # Derivative templates
//!
//! The derivative of every function is stored as an expression in terms of the
//! [`PLACEHOLDER`] variable, which stands for the function's argument. The chain rule substitutes
//! the actual argument for the placeholder:
//!
//! | Function | Template          |
//! | -------- | ----------------- |
//! | `sin`    | `cos(□)`          |
//! | `cos`    | `-sin(□)`         |
//! | `ln`     | `1 / □`           |
//! | `sqrt`   | `1 / (2 sqrt(□))` |
//!
//! ```
//! use symexpr::funcs;
//!
//! let sqrt = funcs::get("sqrt").unwrap();
//! assert_eq!(sqrt.eval(9.0), 3.0);
//! assert!(funcs::get("tan").is_none());
//! ```

use crate::{
    error::{kind::UnknownFunction, similar_names, Error},
    source::Dialect,
    Expr,
};
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt::Debug};

/// The symbol of the variable that stands for the argument in derivative templates. It cannot be
/// written as an identifier in any dialect, so it never clashes with a user's variable when
/// rendered.
pub const PLACEHOLDER: &str = "%arg";

/// A trait implemented by all registered functions.
pub trait Builtin: Debug + Send + Sync {
    /// Returns the name of the function.
    fn name(&self) -> &'static str;

    /// Evaluates the function.
    fn eval(&self, arg: f64) -> f64;

    /// Returns the derivative of the function with respect to its argument, in terms of the
    /// [`PLACEHOLDER`] variable.
    fn derivative_template(&self) -> Expr;

    /// Returns the name used to call the function in source code of the given dialect.
    fn call_name(&self, dialect: Dialect) -> &'static str;
}

/// Builds unit structs implementing [`Builtin`].
macro_rules! build {
    ($(
        $name:literal $upname:ident;
        eval = $func:expr,
        derivative = $template:expr,
        evalexpr = $evalexpr:literal,
        python = $python:literal
    );* $(;)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                #[allow(clippy::redundant_closure_call)]
                pub fn eval_static(n: f64) -> f64 {
                    ($func)(n)
                }
            }

            impl Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn eval(&self, arg: f64) -> f64 {
                    Self::eval_static(arg)
                }

                #[allow(clippy::redundant_closure_call)]
                fn derivative_template(&self) -> Expr {
                    ($template)(Expr::var(PLACEHOLDER))
                }

                fn call_name(&self, dialect: Dialect) -> &'static str {
                    match dialect {
                        Dialect::Evalexpr => $evalexpr,
                        Dialect::Python => $python,
                    }
                }
            }
        )*

        /// Returns an instance of every registered function.
        fn all() -> Vec<Box<dyn Builtin>> {
            vec![$(Box::new($upname)),*]
        }
    };
}

build! {
    "sin" Sin;
        eval = f64::sin,
        derivative = Expr::cos,
        evalexpr = "math::sin",
        python = "math.sin";
    "cos" Cos;
        eval = f64::cos,
        derivative = |arg: Expr| Expr::negative(arg.sin()),
        evalexpr = "math::cos",
        python = "math.cos";
    "ln" Ln;
        eval = f64::ln,
        derivative = |arg: Expr| Expr::quotient(1, arg),
        evalexpr = "math::ln",
        python = "math.log";
    "sqrt" Sqrt;
        eval = f64::sqrt,
        derivative = |arg: Expr| Expr::quotient(1, Expr::product(2, arg.sqrt())),
        evalexpr = "math::sqrt",
        python = "math.sqrt";
}

/// A registered function together with its derivative template.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) builtin: Box<dyn Builtin>,
    pub(crate) derivative: Expr,
}

static REGISTRY: Lazy<HashMap<&'static str, Entry>> = Lazy::new(|| {
    all()
        .into_iter()
        .map(|builtin| {
            let derivative = builtin.derivative_template();
            (builtin.name(), Entry { builtin, derivative })
        })
        .collect()
});

/// Returns the function with the given name, if it is registered.
pub fn get(name: &str) -> Option<&'static dyn Builtin> {
    REGISTRY.get(name).map(|entry| &*entry.builtin)
}

/// Returns the derivative template of the function with the given name, if it is registered.
pub fn derivative_template(name: &str) -> Option<&'static Expr> {
    REGISTRY.get(name).map(|entry| &entry.derivative)
}

/// Returns the names of all registered functions, in alphabetical order.
pub fn names() -> Vec<&'static str> {
    let mut names = REGISTRY.keys().copied().collect::<Vec<_>>();
    names.sort_unstable();
    names
}

/// Looks up the function with the given name, returning an [`UnknownFunction`] error with
/// suggestions if it is not registered.
pub(crate) fn lookup(name: &str) -> Result<&'static Entry, Error> {
    REGISTRY.get(name).ok_or_else(|| Error::new(UnknownFunction {
        name: name.to_string(),
        suggestions: similar_names(name, REGISTRY.keys().copied()),
    }))
}
