//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type returned by every fallible operation on an expression tree.
//!
//! An [`Error`] does not store source spans directly. Expressions are built programmatically, so
//! there is no source text until the expression is rendered. Instead, an error records the
//! **path** to the node it originated from: the sequence of child indices leading from the root
//! of the tree the operation was invoked on down to the failing node. The renderer of the
//! expression crate turns that path into a span inside the rendered source, which is then handed
//! to [`Error::build_report`].

// lets `#[derive(ErrorKind)]` refer to this crate by name in its own tests
extern crate self as symexpr_error;

use ariadne::{Color, Report};
use std::{any::Any, collections::VecDeque, fmt::{Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns this error kind as [`Any`], so that callers can inspect the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with the node of an expression tree it originated from.
#[derive(Debug)]
pub struct Error {
    /// Child indices leading from the root of the expression to the node that caused the error.
    pub path: VecDeque<usize>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error of the given kind, originating from the node the operation was
    /// invoked on.
    pub fn new(kind: impl ErrorKind + 'static) -> Self {
        Self { path: VecDeque::new(), kind: Box::new(kind) }
    }

    /// Marks the error as having originated from the `index`-th child of the node currently
    /// being processed. Called while the error propagates up the tree.
    pub fn within(mut self, index: usize) -> Self {
        self.path.push_front(index);
        self
    }

    /// Returns true if the error is of kind `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the error kind if it is of kind `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind, labelling the given span of the source.
    pub fn build_report<'a>(
        &self,
        src_id: &'a str,
        span: Range<usize>,
    ) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &[span])
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}
