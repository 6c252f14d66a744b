mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait of `symexpr-error` for the given struct.
///
/// The trait and the `ariadne` crate must be in scope of the deriving crate:
/// ```
/// use symexpr_attrs::ErrorKind;
/// use symexpr_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "this variable is not bound", labels = ["this variable"])]
/// pub struct Foo;
/// ```
///
/// The information of the error is customized with the `error` attribute by adding the
/// corresponding tags to it:
///
/// | Tag       | Description                                                                     |
/// | --------- | ------------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error. Required.                        |
/// | `labels`  | An array of label texts. The n-th label points at the n-th span of the error.   |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it.    |
/// | `note`    | Optional note with additional context.                                          |
///
/// Each tag accepts an expression. The expression is evaluated inside a `&self` method, so fields
/// are accessed with `self.field`. `message` must evaluate to something implementing `ToString`;
/// labels, help and notes are passed to the corresponding `ariadne` builder methods.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    target.into_token_stream().into()
}
