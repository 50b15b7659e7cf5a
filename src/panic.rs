//! Unrecoverable faults.
//!
//! A [`Panic`] is the payload this crate unwinds with when a program reaches a
//! state it cannot recover from, such as calling `unwrap` on the wrong
//! variant. Panics are never returned as data: they travel by unwinding and
//! the only code allowed to intercept them is a bridging boundary (see
//! [`crate::bridge`]), which must re-raise them untouched.
//!
//! Every panic may carry an [`Origin`]: an opaque, boxed cause that is kept
//! for display and for callers that want to `downcast_ref` it.
//!
//! # Examples
//!
//! ```rust
//! use okerr::panic::{Panic, PanicKind};
//!
//! let caught = Panic::capture(|| Panic::new("disk on fire").raise());
//! let panic = caught.unwrap_err();
//! assert_eq!(panic.kind(), PanicKind::Panic);
//! assert_eq!(panic.to_string(), "Panic: disk on fire");
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

// =============================================================================
// Origin
// =============================================================================

/// The opaque cause attached to a [`Panic`] or a [`StdError`](crate::StdError).
///
/// An origin owns an arbitrary value. Apart from an optional name and message
/// captured when it was built, the value is never inspected by this crate.
pub struct Origin {
    name: Option<Cow<'static, str>>,
    message: Option<String>,
    value: Box<dyn Any + Send>,
}

impl Origin {
    /// Wraps an arbitrary value. The short type name of `V` becomes the
    /// origin's name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::panic::Origin;
    ///
    /// struct Timeout;
    ///
    /// let origin = Origin::new(Timeout);
    /// assert_eq!(origin.name(), Some("Timeout"));
    /// assert!(origin.is::<Timeout>());
    /// ```
    #[must_use]
    pub fn new<V: Any + Send>(value: V) -> Self {
        Self {
            name: Some(Cow::Borrowed(short_type_name::<V>())),
            message: None,
            value: Box::new(value),
        }
    }

    /// Wraps an error, capturing its type name and its `Display` text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::panic::Origin;
    ///
    /// let parse_error = "x".parse::<i32>().unwrap_err();
    /// let origin = Origin::from_error(parse_error);
    /// assert_eq!(origin.name(), Some("ParseIntError"));
    /// assert_eq!(origin.message(), Some("invalid digit found in string"));
    /// ```
    #[must_use]
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + 'static,
    {
        Self {
            name: Some(Cow::Borrowed(short_type_name::<E>())),
            message: Some(error.to_string()),
            value: Box::new(error),
        }
    }

    /// Adopts a payload caught from an unwind.
    ///
    /// An [`Origin`] payload is adopted as-is, keeping its name and message.
    /// `&'static str` and `String` payloads (what `panic!` produces) and boxed
    /// `dyn Error` payloads contribute their text as the message. Any other
    /// payload stays anonymous because its type can no longer be named once
    /// erased.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::panic::Origin;
    ///
    /// let raised = Origin::new(7_u8).with_name("Timeout").with_message("took too long");
    /// let adopted = Origin::from_payload(Box::new(raised));
    /// assert_eq!(adopted.to_string(), "Timeout: took too long");
    /// assert!(adopted.is::<u8>());
    /// ```
    #[must_use]
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Self>() {
            Ok(origin) => return *origin,
            Err(payload) => payload,
        };
        let message = payload
            .downcast_ref::<&'static str>()
            .map(|text| (*text).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .or_else(|| {
                payload
                    .downcast_ref::<Box<dyn std::error::Error + Send + Sync>>()
                    .map(ToString::to_string)
            })
            .or_else(|| {
                payload
                    .downcast_ref::<Box<dyn std::error::Error + Send>>()
                    .map(ToString::to_string)
            });
        Self {
            name: None,
            message,
            value: payload,
        }
    }

    /// Overrides the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overrides the display message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The display name of the wrapped value, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The display message of the wrapped value, if known.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` if the wrapped value is a `V`.
    #[must_use]
    pub fn is<V: Any>(&self) -> bool {
        self.value.is::<V>()
    }

    /// Borrows the wrapped value as a `V`, if it is one.
    #[must_use]
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.value.downcast_ref::<V>()
    }

    /// Gives back the wrapped value.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.value
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Origin")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self.message()) {
            (Some(name), Some(message)) => write!(formatter, "{name}: {message}"),
            (Some(name), None) => formatter.write_str(name),
            (None, Some(message)) => formatter.write_str(message),
            (None, None) => formatter.write_str("<opaque>"),
        }
    }
}

/// Last path segment of a type name, without generic arguments.
///
/// Tuples and arrays keep their full name.
pub(crate) fn short_type_name<V: ?Sized>() -> &'static str {
    let full = std::any::type_name::<V>();
    if full.starts_with(['(', '[']) {
        return full;
    }
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// `" from <name>"` when the origin is named, empty otherwise.
pub(crate) fn origin_suffix(origin: Option<&Origin>) -> String {
    origin
        .and_then(Origin::name)
        .map_or_else(String::new, |name| format!(" from {name}"))
}

// =============================================================================
// Panic
// =============================================================================

/// The flavour of a [`Panic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanicKind {
    /// A generic fault, including failed `expect` calls.
    Panic,
    /// `unwrap` family called on the non-matching variant.
    Unwrap,
    /// An error-conversion handler failed to produce an error.
    InvalidError,
}

impl PanicKind {
    /// The display name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Panic => "Panic",
            Self::Unwrap => "UnwrapPanic",
            Self::InvalidError => "InvalidErrorPanic",
        }
    }
}

impl fmt::Display for PanicKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// An unrecoverable fault.
///
/// Raised with [`Panic::raise`], which unwinds with the `Panic` itself as the
/// payload. Displays as `"<Kind>: <message>"`, or
/// `"<Kind> from <OriginName>: <message>"` when the origin has a name.
#[derive(Debug, thiserror::Error)]
#[error("{kind}{}: {message}", origin_suffix(.origin.as_ref()))]
pub struct Panic {
    kind: PanicKind,
    message: String,
    origin: Option<Origin>,
}

impl Panic {
    /// Creates a generic panic.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::of_kind(PanicKind::Panic, message, None)
    }

    /// Creates a generic panic caused by `origin`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::panic::{Origin, Panic};
    ///
    /// struct Corruption;
    ///
    /// let panic = Panic::with_origin("checksum mismatch", Origin::new(Corruption));
    /// assert_eq!(panic.to_string(), "Panic from Corruption: checksum mismatch");
    /// ```
    #[must_use]
    pub fn with_origin(message: impl Into<String>, origin: Origin) -> Self {
        Self::of_kind(PanicKind::Panic, message, Some(origin))
    }

    pub(crate) fn of_kind(
        kind: PanicKind,
        message: impl Into<String>,
        origin: Option<Origin>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            origin,
        }
    }

    /// The kind of fault.
    #[must_use]
    pub const fn kind(&self) -> PanicKind {
        self.kind
    }

    /// The message supplied when the panic was created.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The cause, if any.
    #[must_use]
    pub const fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// `"<Kind>"` or `"<Kind> from <OriginName>"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}{}", self.kind, origin_suffix(self.origin()))
    }

    /// Unwinds with this panic as the payload.
    #[track_caller]
    pub fn raise(self) -> ! {
        tracing::trace!(kind = %self.kind, message = %self.message, "raising panic");
        panic::panic_any(self)
    }

    /// Returns `true` if an unwind payload is a [`Panic`].
    #[must_use]
    pub fn is_panic(payload: &(dyn Any + Send)) -> bool {
        payload.is::<Self>()
    }

    /// Classifies an unwind payload.
    ///
    /// # Errors
    ///
    /// Gives the payload back untouched when it is not a [`Panic`].
    pub fn catch(
        payload: Box<dyn Any + Send>,
    ) -> std::result::Result<Box<Self>, Box<dyn Any + Send>> {
        payload.downcast::<Self>()
    }

    /// Runs `function`, turning a [`Panic`] unwind into `Err`.
    ///
    /// This is meant for the outermost layer of a host program or for tests.
    /// Unwinds that are not a [`Panic`] continue unwinding untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`Panic`] that `function` raised.
    pub fn capture<R>(function: impl FnOnce() -> R) -> std::result::Result<R, Self> {
        match panic::catch_unwind(AssertUnwindSafe(function)) {
            Ok(value) => Ok(value),
            Err(payload) => match payload.downcast::<Self>() {
                Ok(raised) => Err(*raised),
                Err(foreign) => panic::resume_unwind(foreign),
            },
        }
    }
}

/// Constructors for [`Panic`]s of kind [`PanicKind::Unwrap`].
pub struct UnwrapPanic;

impl UnwrapPanic {
    /// Creates an unwrap panic.
    #[allow(clippy::new_ret_no_self)]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Panic {
        Panic::of_kind(PanicKind::Unwrap, message, None)
    }
}

/// Constructors for [`Panic`]s of kind [`PanicKind::InvalidError`].
pub struct InvalidErrorPanic;

impl InvalidErrorPanic {
    /// Creates an invalid-error panic caused by `origin`.
    #[allow(clippy::new_ret_no_self)]
    #[must_use]
    pub fn new(message: impl Into<String>, origin: Origin) -> Panic {
        Panic::of_kind(PanicKind::InvalidError, message, Some(origin))
    }
}

static_assertions::assert_impl_all!(Panic: Send, std::error::Error);
static_assertions::assert_impl_all!(Origin: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    struct Overflow(u32);

    #[rstest]
    #[case(PanicKind::Panic, "Panic: boom")]
    #[case(PanicKind::Unwrap, "UnwrapPanic: boom")]
    #[case(PanicKind::InvalidError, "InvalidErrorPanic: boom")]
    fn display_without_origin(#[case] kind: PanicKind, #[case] expected: &str) {
        let panic = Panic::of_kind(kind, "boom", None);
        assert_eq!(panic.to_string(), expected);
    }

    #[rstest]
    fn display_with_named_origin() {
        let panic = Panic::with_origin("counter wrapped", Origin::new(Overflow(7)));
        assert_eq!(panic.to_string(), "Panic from Overflow: counter wrapped");
        assert_eq!(panic.name(), "Panic from Overflow");
    }

    #[rstest]
    fn display_with_anonymous_origin() {
        let panic = Panic::with_origin("lost", Origin::from_payload(Box::new("text")));
        assert_eq!(panic.to_string(), "Panic: lost");
    }

    #[rstest]
    fn origin_keeps_value_for_downcast() {
        let origin = Origin::new(Overflow(7));
        assert_eq!(origin.downcast_ref::<Overflow>(), Some(&Overflow(7)));
        assert!(origin.downcast_ref::<String>().is_none());
    }

    #[rstest]
    #[case(Box::new("static text") as Box<dyn Any + Send>, Some("static text"))]
    #[case(Box::new(String::from("owned text")) as Box<dyn Any + Send>, Some("owned text"))]
    #[case(Box::new(42_u8) as Box<dyn Any + Send>, None)]
    fn origin_from_payload_reads_text(
        #[case] payload: Box<dyn Any + Send>,
        #[case] expected: Option<&str>,
    ) {
        let origin = Origin::from_payload(payload);
        assert_eq!(origin.message(), expected);
        assert_eq!(origin.name(), None);
    }

    #[rstest]
    fn origin_payload_is_adopted_unchanged() {
        let raised = Origin::new(Overflow(3)).with_message("counter wrapped");
        let adopted = Origin::from_payload(Box::new(raised));
        assert_eq!(adopted.name(), Some("Overflow"));
        assert_eq!(adopted.message(), Some("counter wrapped"));
        assert_eq!(adopted.downcast_ref::<Overflow>(), Some(&Overflow(3)));
    }

    #[rstest]
    fn boxed_error_payload_keeps_display_text() {
        let error: Box<dyn std::error::Error + Send + Sync> = "socket closed".into();
        let origin = Origin::from_payload(Box::new(error));
        assert_eq!(origin.message(), Some("socket closed"));
    }

    #[rstest]
    fn short_type_name_strips_path_and_generics() {
        assert_eq!(short_type_name::<Overflow>(), "Overflow");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
    }

    #[rstest]
    fn short_type_name_keeps_tuples_and_arrays_whole() {
        assert_eq!(
            short_type_name::<(i32, String)>(),
            std::any::type_name::<(i32, String)>()
        );
        assert_eq!(short_type_name::<[u8; 4]>(), "[u8; 4]");
    }

    #[rstest]
    fn capture_returns_raised_panic() {
        let caught = Panic::capture(|| -> i32 { UnwrapPanic::new("nope").raise() });
        let panic = caught.unwrap_err();
        assert_eq!(panic.kind(), PanicKind::Unwrap);
        assert_eq!(panic.message(), "nope");
    }

    #[rstest]
    fn capture_passes_values_through() {
        assert_eq!(Panic::capture(|| 5).ok(), Some(5));
    }

    #[rstest]
    fn capture_lets_foreign_panics_continue() {
        let outer = panic::catch_unwind(|| Panic::capture(|| panic!("foreign")));
        let payload = outer.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"foreign"));
    }

    #[rstest]
    fn is_panic_classifies_payloads() {
        let ours: Box<dyn Any + Send> = Box::new(Panic::new("x"));
        let theirs: Box<dyn Any + Send> = Box::new("x");
        assert!(Panic::is_panic(&*ours));
        assert!(!Panic::is_panic(&*theirs));
    }
}
