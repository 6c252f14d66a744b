use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The syntax of the source code produced by [`Expr::to_source`](crate::Expr::to_source).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum Dialect {
    /// The expression language of the [`evalexpr`](https://docs.rs/evalexpr) crate. Powers are
    /// written with `^`, and functions are called through the `math::` namespace (`math::sin`,
    /// `math::cos`, `math::ln`, `math::sqrt`).
    ///
    /// This is the default option.
    #[default]
    Evalexpr,

    /// Python expressions, assuming the `math` module is imported. Powers are written with `**`,
    /// and functions are called through the module (`math.sin`, `math.cos`, `math.log`,
    /// `math.sqrt`).
    Python,
}

impl Dialect {
    /// Returns the binary operator used for powers.
    pub fn power_operator(self) -> &'static str {
        match self {
            Dialect::Evalexpr => "^",
            Dialect::Python => "**",
        }
    }

    /// Utility function to create a new [`SourceOptions`] with the same options as the given
    /// [`SourceOptions`], but with the dialect set to this value.
    pub fn inside(self, options: SourceOptions) -> SourceOptions {
        SourceOptions {
            dialect: self,
            ..options
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Evalexpr => write!(f, "evalexpr"),
            Dialect::Python => write!(f, "python"),
        }
    }
}

/// Options for rendering an expression as source code.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceOptions {
    /// The syntax to produce.
    pub dialect: Dialect,

    /// The number of fractional digits to write for each number. If [`None`], numbers are written
    /// in the shortest form that reads back as the same `f64`.
    ///
    /// Regardless of this option, every number is written with a decimal point, so that
    /// evaluators that distinguish integers from floats never perform integer arithmetic.
    pub precision: Option<usize>,
}

impl SourceOptions {
    /// Wraps the given [`SourceOptions`] into a builder for further customization.
    pub fn into_builder(self) -> SourceOptionsBuilder {
        SourceOptionsBuilder(self)
    }
}

/// Helper struct to build a [`SourceOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SourceOptionsBuilder(SourceOptions);

impl SourceOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dialect. See [`Dialect`] for more information.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.0.dialect = dialect;
        self
    }

    /// Sets the number of fractional digits. See [`SourceOptions::precision`] for more
    /// information.
    pub fn precision(mut self, precision: usize) -> Self {
        self.0.precision = Some(precision);
        self
    }

    /// Builds the [`SourceOptions`] struct.
    pub fn build(self) -> SourceOptions {
        self.0
    }
}

impl From<SourceOptionsBuilder> for SourceOptions {
    fn from(builder: SourceOptionsBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let options = SourceOptionsBuilder::new()
            .dialect(Dialect::Python)
            .precision(3)
            .build();
        assert_eq!(options, SourceOptions { dialect: Dialect::Python, precision: Some(3) });

        let options = Dialect::Evalexpr.inside(options);
        assert_eq!(options.dialect, Dialect::Evalexpr);
        assert_eq!(options.into_builder().build().precision, Some(3));
    }

    #[test]
    fn defaults() {
        let options = SourceOptions::default();
        assert_eq!(options.dialect, Dialect::Evalexpr);
        assert_eq!(options.precision, None);
        assert_eq!(Dialect::Python.to_string(), "python");
        assert_eq!(Dialect::Python.power_operator(), "**");
    }
}
