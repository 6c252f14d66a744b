mod error;

use clap::Parser;
use error::{report_to_stderr, BindingError};
use symexpr::{
    latex::Latex,
    numerical::Bindings,
    source::{Dialect, SourceOptions, SourceOptionsBuilder},
    Expr,
};
use tracing_subscriber::EnvFilter;

/// Shows what the symbolic expression engine can do with a fixed set of expressions.
#[derive(Debug, Parser)]
#[command(name = "symexpr-cli", version)]
struct Args {
    /// Render source code for Python instead of `evalexpr`.
    #[arg(long)]
    python: bool,

    /// Number of fractional digits to write for numeric literals.
    #[arg(long, value_name = "N")]
    precision: Option<usize>,

    /// The variable to differentiate with respect to.
    #[arg(long, value_name = "VAR", default_value = "x")]
    wrt: String,

    /// The values of the variables, `x=1` if none are given.
    #[arg(value_name = "NAME=VALUE", value_parser = parse_binding)]
    bindings: Vec<(String, f64)>,
}

impl Args {
    /// How to render expressions as source code.
    fn options(&self) -> SourceOptions {
        let mut options = SourceOptionsBuilder::new();
        if self.python {
            options = options.dialect(Dialect::Python);
        }
        if let Some(precision) = self.precision {
            options = options.precision(precision);
        }
        options.build()
    }

    /// The bindings to evaluate expressions with.
    fn bindings(&self) -> Bindings {
        if self.bindings.is_empty() {
            return Bindings::from([("x", 1.0)]);
        }
        self.bindings
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect()
    }
}

/// Parses a `NAME=VALUE` binding.
fn parse_binding(arg: &str) -> Result<(String, f64), BindingError> {
    let (name, value) = arg.split_once('=').ok_or(BindingError::MissingEquals)?;
    if name.is_empty() {
        return Err(BindingError::EmptyName);
    }
    let value = value.parse()
        .map_err(|err| BindingError::InvalidValue(value.to_string(), err))?;
    Ok((name.to_string(), value))
}

/// The expressions to show, with a short description of each.
fn showcase() -> Vec<(&'static str, Expr)> {
    let x = || Expr::var("x");
    vec![
        ("polynomial", 3 * x().pow(2) - 2 * x() + 1),
        ("product of sums", (x() + 1) * (x() + 2)),
        ("product with a function", x() * x().sin()),
        ("quotient", (x().pow(2) + 1) / (x() - 1)),
        ("exponential", Expr::power(2, x())),
        ("composition", (x().pow(2) + 1).sqrt().ln()),
        ("power of two variables", x().pow(Expr::var("y"))),
        ("unknown function", Expr::apply("tan", x())),
    ]
}

/// Everything needed to show an expression, resolved from the [`Args`].
#[derive(Debug)]
struct Settings {
    options: SourceOptions,
    wrt: String,
    bindings: Bindings,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self { options: args.options(), bindings: args.bindings(), wrt: args.wrt }
    }
}

/// Prints the source code of `expr` and its value, or reports the errors raised while computing
/// them.
fn print_source_and_value(label: &str, expr: &Expr, settings: &Settings) {
    match expr.to_source(settings.options) {
        Ok(src) => println!("  {} source: {}", label, src),
        Err(err) => report_to_stderr(expr, &err, settings.options),
    }
    match expr.evaluate(&settings.bindings) {
        Ok(value) => println!("  {} value:  {}", label, value),
        Err(err) => report_to_stderr(expr, &err, settings.options),
    }
}

/// Shows everything that can be done with `expr`.
fn show(description: &str, expr: &Expr, settings: &Settings) {
    println!("{}: {}", description, expr);
    println!("  latex:             {}", expr.as_display());
    print_source_and_value("expression", expr, settings);
    println!("  expanded:          {}", expr.expand());

    match expr.derivative(&settings.wrt) {
        Ok(derivative) => {
            println!("  d/d{}:              {}", settings.wrt, derivative);
            print_source_and_value("derivative", &derivative, settings);
        },
        Err(err) => report_to_stderr(expr, &err, settings.options),
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    let settings = Settings::from(args);
    for (description, expr) in showcase() {
        show(description, &expr, &settings);
    }
}
