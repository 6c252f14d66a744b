use levenshtein::levenshtein;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default maximum depth of an expression tree that can be evaluated or differentiated. This
/// is used to detect stack overflows.
pub const MAX_DEPTH: usize = 1 << 11;

/// The variables to use when evaluating an expression, along with the limits of the evaluation.
///
/// Bindings are supplied only at evaluation time; an expression never stores the values of its
/// variables.
///
/// ```
/// use symexpr::{numerical::Bindings, Expr};
///
/// let mut bindings = Bindings::from([("x", 2.0)]);
/// bindings.add_var("y", 0.5);
///
/// let expr = Expr::var("x") * Expr::var("y");
/// assert_eq!(expr.evaluate(&bindings).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bindings {
    /// The values of the variables.
    vars: HashMap<String, f64>,

    /// The maximum depth of a tree that can be evaluated with these bindings.
    max_depth: usize,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            vars: HashMap::new(),
            max_depth: MAX_DEPTH,
        }
    }
}

impl Bindings {
    /// Creates new, empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a variable to a value, replacing any previous value.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns the bound variables.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }

    /// Returns the maximum depth of a tree that can be evaluated with these bindings.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sets the maximum depth of a tree that can be evaluated with these bindings.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Returns all bound variables with a name similar to the given name.
    pub fn get_similar_vars(&self, name: &str) -> Vec<&str> {
        self.vars
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(|n| n.as_str())
            .collect()
    }
}

impl<const N: usize> From<[(&str, f64); N]> for Bindings {
    fn from(vars: [(&str, f64); N]) -> Self {
        vars.into_iter().collect()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            ..Default::default()
        }
    }
}

impl<'a> Extend<(&'a str, f64)> for Bindings {
    fn extend<I: IntoIterator<Item = (&'a str, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.add_var(name, value);
        }
    }
}
