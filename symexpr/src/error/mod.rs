//! Errors that can occur while building, evaluating, differentiating or rendering expressions.
//!
//! Every fallible operation returns a [`symexpr_error::Error`], which wraps one of the error kinds
//! in [`kind`]. Use [`Error::is`] or [`Error::downcast_ref`] to find out which one:
//!
//! ```
//! use symexpr::{error::kind::UnboundVariable, numerical::Bindings, Expr};
//!
//! let err = Expr::var("y").evaluate(&Bindings::from([("x", 1.0)])).unwrap_err();
//! assert!(err.is::<UnboundVariable>());
//! ```

pub mod kind;

pub use symexpr_error::Error;

use levenshtein::levenshtein;

/// Returns the candidates whose name is within one edit of `name`.
pub(crate) fn similar_names<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut similar = candidates
        .into_iter()
        .filter(|candidate| levenshtein(candidate, name) < 2)
        .map(str::to_string)
        .collect::<Vec<_>>();
    similar.sort();
    similar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similar_names_within_one_edit() {
        let names = ["sin", "sqrt", "cos", "ln"];
        assert_eq!(similar_names("sine", names), ["sin"]);
        assert_eq!(similar_names("cosh", names), ["cos"]);
        assert!(similar_names("tan", names).is_empty());
    }
}
