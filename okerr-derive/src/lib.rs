//! Derive macro for okerr tagged errors.
//!
//! # Available Derive Macros
//!
//! - [`ResultError`]: Implements `okerr::ResultError` for an error type
//!
//! # Example
//!
//! ```rust,ignore
//! use okerr::{Origin, ResultError};
//!
//! #[derive(Debug, thiserror::Error, ResultError)]
//! #[error("user {id} not found")]
//! #[result_error(tag = "NotFound")]
//! struct UserNotFound {
//!     id: u64,
//!     #[origin]
//!     cause: Option<Origin>,
//! }
//!
//! let error = UserNotFound { id: 7, cause: None };
//! assert_eq!(error.tag(), "NotFound");
//! assert!(error.origin().is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod result_error;

use proc_macro::TokenStream;

/// Derive macro implementing `okerr::ResultError`.
///
/// # Attributes
///
/// - `#[result_error(tag = "...")]` on the type sets `TAG`. Without it the
///   tag is the type's name.
/// - `#[origin]` on one struct field exposes it through `origin()`. The field
///   must be an `okerr::Origin`, or an `Option<okerr::Origin>` from either
///   `std` or `okerr`.
///
/// # Requirements
///
/// The type must implement `std::error::Error` (for example through
/// `thiserror`) and be `Send + 'static`.
///
/// # Errors
///
/// Emits a compile error for unions, for unknown `result_error` keys, and for
/// more than one `#[origin]` field.
#[proc_macro_derive(ResultError, attributes(result_error, origin))]
pub fn derive_result_error(input: TokenStream) -> TokenStream {
    result_error::derive_result_error_impl(input)
}
