#![deny(unused_must_use)]
#![warn(missing_docs)]

//! Defines the error type used by Corvid.
//!
//! While this crate is technically public API, it is only useful if you have a reason to need
//! to create new Corvid errors. Normally, the API exposed in the `corvid` crate should be enough.

use backtrace::Backtrace;
use futures::FutureExt;
use std::any::Any;
use std::borrow::Cow;
use std::error::{Error as StdError};
use std::fmt;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::*;

pub use std::result::{Result as StdResult};

/// A wrapper around a [`std::error::Error`].
///
/// This is used to help ensure that all errors returned from `corvid` have a proper cause
/// attached.
#[derive(Debug)]
pub struct LibError(Box<dyn StdError + Send + Sync + 'static>);
impl LibError {
    /// Borrows the wrapped error.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    /// Returns the wrapped error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}
impl <T: StdError + Send + Sync + 'static> From<T> for LibError {
    #[inline(never)] #[cold]
    fn from(t: T) -> Self {
        LibError(Box::new(t))
    }
}

/// Represents the kind of error that occurred.
#[derive(Error, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Invalid input was provided to the library.
    ///
    /// This generally indicates a bug in an user of the library.
    #[error("Invalid API usage: {0}")]
    InvalidInput(&'static str),
    /// An internal error has occurred.
    ///
    /// This generally indicates a bug in the library.
    #[error("Internal error: {0}")]
    InternalError(&'static str),
    /// Used to convey information about a panic to event handlers or task owners.
    ///
    /// This should not be returned from other methods in normal circumstances, and panics in
    /// most library code will directly propagate to the caller.
    #[error("{0}")]
    Panicked(Cow<'static, str>),

    /// A payload did not contain a field that is required to decode it.
    #[error("Payload is missing required field `{0}`")]
    MissingField(&'static str),
    /// A payload contained a field with an unexpected type or value.
    #[error("Payload field `{0}` has an invalid value")]
    InvalidField(&'static str),
    /// Discord sent a payload that breaks an invariant the gateway protocol guarantees.
    ///
    /// Unlike a missing or malformed field, this indicates either a bug in the library or an
    /// undocumented change in Discord's behaviour.
    #[error("Gateway protocol violation: {0}")]
    ProtocolViolation(&'static str),
    /// No decoder is registered for a gateway event name.
    #[error("Unknown gateway event: {0}")]
    UnknownEvent(String),

    /// An operation did not complete before its deadline.
    #[error("Timed out: {0}")]
    TimedOut(&'static str),
    /// An operation was cancelled before it produced a result.
    #[error("Cancelled: {0}")]
    Cancelled(&'static str),
}

struct ErrorData {
    kind: ErrorKind,
    backtrace: Option<Backtrace>,
    cause: Option<LibError>,
}

/// An error type used throughout the library.
pub struct Error(Box<ErrorData>);
impl Error {
    /// Creates a new error with no backtrace or cause.
    #[inline(never)] #[cold]
    pub fn new(kind: ErrorKind) -> Self {
        Error(Box::new(ErrorData {
            kind, backtrace: None, cause: None,
        }))
    }

    /// Creates a new error with the given cause.
    #[inline(never)] #[cold]
    pub fn new_with_cause(kind: ErrorKind, cause: impl Into<LibError>) -> Self {
        Error::new(kind).with_cause(cause)
    }

    /// Creates a new error with a backtrace.
    #[inline(never)] #[cold]
    pub fn new_with_backtrace(kind: ErrorKind) -> Self {
        Error::new(kind).with_backtrace()
    }

    /// Attaches a cause to this error.
    #[inline(never)] #[cold]
    pub fn with_cause(mut self, cause: impl Into<LibError>) -> Self {
        self.0.cause = Some(cause.into());
        self
    }

    /// Attaches a backtrace to this error.
    #[inline(never)] #[cold]
    pub fn with_backtrace(mut self) -> Self {
        if self.backtrace().is_none() {
            self.0.backtrace = Some(Backtrace::new());
        }
        self
    }

    #[inline(never)] #[cold]
    fn wrap_panic(panic: Box<dyn Any + Send + 'static>) -> Error {
        let panic: Cow<'static, str> = if let Some(s) = panic.downcast_ref::<&'static str>() {
            (*s).into()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone().into()
        } else {
            "<non-string panic info>".into()
        };
        Error::new(ErrorKind::Panicked(panic))
    }

    /// Returns the type of error contained in this object.
    pub fn error_kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    /// Returns the backtrace, if one was recorded.
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.0.backtrace.as_ref()
    }

    /// Returns `true` if this error was likely due to a bug in either user code, Corvid, or
    /// Discord's adherence to its own protocol.
    pub fn is_error(&self) -> bool {
        matches!(
            self.error_kind(),
            ErrorKind::InternalError(_) | ErrorKind::InvalidInput(_) | ErrorKind::Panicked(_) |
                ErrorKind::ProtocolViolation(_)
        )
    }

    /// Returns `true` if this error was caused by a payload that could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(
            self.error_kind(),
            ErrorKind::MissingField(_) | ErrorKind::InvalidField(_)
        )
    }

    /// Returns `true` if this error was caused by a deadline elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self.error_kind(), ErrorKind::TimedOut(_))
    }

    /// Returns `true` if this error was caused by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.error_kind(), ErrorKind::Cancelled(_))
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.0.cause.as_ref() {
            Some(x) => Some(x.as_error()),
            None => None,
        }
    }
}
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Error")
            .field(&self.0.kind)
            .field(&self.0.cause)
            .finish()
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.kind, f)?;
        if let Some(cause) = &self.0.cause {
            write!(f, ": {}", cause.as_error())?;
        }
        Ok(())
    }
}

/// The result type used throughout the library.
pub type Result<T> = StdResult<T, Error>;

/// The result type used for [`LibError`]s.
pub type LibResult<T> = StdResult<T, LibError>;

/// Helpers for converting [`LibError`]s into [`Error`]s
pub trait ErrorExt<T>: Sized {
    /// Converts this into an Corvid error given an error type.
    fn context(self, kind: ErrorKind) -> Result<T>;

    /// Creates an error indicating an internal error.
    fn internal_err(self, text: &'static str) -> Result<T> {
        self.context(ErrorKind::InternalError(text))
    }
    /// Creates an error indicating invalid input to a function.
    fn invalid_input(self, text: &'static str) -> Result<T> {
        self.context(ErrorKind::InvalidInput(text))
    }
    /// Creates an error indicating that a payload field was missing.
    fn missing_field(self, field: &'static str) -> Result<T> {
        self.context(ErrorKind::MissingField(field))
    }
    /// Creates an error indicating that a payload field had the wrong shape.
    fn invalid_field(self, field: &'static str) -> Result<T> {
        self.context(ErrorKind::InvalidField(field))
    }
}
impl <T> ErrorExt<T> for Option<T> {
    #[inline(always)]
    fn context(self, kind: ErrorKind) -> Result<T> {
        match self {
            Some(x) => Ok(x),
            None => Err(Error::new_with_backtrace(kind)),
        }
    }
}
impl <T, E: Into<LibError>> ErrorExt<T> for StdResult<T, E> {
    #[inline(always)]
    fn context(self, kind: ErrorKind) -> Result<T> {
        match self {
            Ok(x) => Ok(x),
            Err(e) => Err(Error::new_with_cause(kind, e.into()).with_backtrace()),
        }
    }
}

/// Catches panics and wraps them in an [`Error`].
///
/// This is exposed as an non-inherent method to avoid namespace pollution.
pub fn catch_panic<T>(func: impl FnOnce() -> Result<T>) -> Result<T> {
    match catch_unwind(AssertUnwindSafe(func)) {
        Ok(r) => r,
        Err(e) => Err(Error::wrap_panic(e)),
    }
}

/// Catches panics in a future and wraps them in an [`Error`].
///
/// This is exposed as an non-inherent method to avoid namespace pollution.
pub async fn catch_panic_async<T>(fut: impl Future<Output = Result<T>>) -> Result<T> {
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(v) => v,
        Err(panic) => Err(Error::wrap_panic(panic)),
    }
}

/// A macro to help with creating [`ErrorKind`]s.
///
/// # Examples
///
/// ```rust
/// # use corvid_errors::*;
/// assert_eq!(error_kind!("Internal error."), ErrorKind::InternalError("Internal error."));
/// assert_eq!(error_kind!(InvalidInput, "test"), ErrorKind::InvalidInput("test"));
/// ```
#[macro_export]
macro_rules! error_kind {
    ($error:literal $(,)?) => {
        $crate::ErrorKind::InternalError($error)
    };
    ($variant:ident, $($body:expr),* $(,)?) => {
        $crate::ErrorKind::$variant($($body,)*)
    };
}

/// Returns an error, using the same syntax as [`error_kind!`].
#[macro_export]
macro_rules! bail {
    ($($tt:tt)*) => {
        return Err($crate::Error::new_with_backtrace($crate::error_kind!($($tt)*)))
    }
}

/// Checks a condition then returns an error, using the same syntax as [`error_kind!`].
#[macro_export]
macro_rules! ensure {
    ($check:expr, $($tt:tt)*) => {
        if !$check {
            $crate::bail!($($tt)*);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_with(kind: ErrorKind) -> Result<()> {
        Err(Error::new(kind))
    }

    #[test]
    fn classification() {
        assert!(fails_with(ErrorKind::MissingField("id")).unwrap_err().is_decode());
        assert!(fails_with(ErrorKind::InvalidField("id")).unwrap_err().is_decode());
        assert!(fails_with(ErrorKind::ProtocolViolation("x")).unwrap_err().is_error());
        assert!(!fails_with(ErrorKind::ProtocolViolation("x")).unwrap_err().is_decode());
        assert!(!fails_with(ErrorKind::InternalError("x")).unwrap_err().is_decode());
        assert!(fails_with(ErrorKind::TimedOut("x")).unwrap_err().is_timeout());
        assert!(!fails_with(ErrorKind::TimedOut("x")).unwrap_err().is_cancelled());
        assert!(fails_with(ErrorKind::Cancelled("x")).unwrap_err().is_cancelled());
    }

    #[test]
    fn ensure_bails_with_kind() {
        fn check(value: bool) -> Result<u32> {
            ensure!(value, ProtocolViolation, "value must be set");
            Ok(1)
        }
        assert_eq!(check(true).unwrap(), 1);
        let err = check(false).unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::ProtocolViolation("value must be set"));
        assert!(err.backtrace().is_some());
    }

    #[test]
    fn option_context() {
        let err = None::<u32>.missing_field("channel_id").unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::MissingField("channel_id"));
        assert_eq!(err.to_string(), "Payload is missing required field `channel_id`");
    }

    #[test]
    fn result_context_keeps_cause() {
        let parsed = "abc".parse::<u64>().invalid_field("id");
        let err = parsed.unwrap_err();
        assert!(err.source().is_some());
        assert_eq!(err.error_kind(), &ErrorKind::InvalidField("id"));
    }

    #[test]
    fn panics_are_captured() {
        let err = catch_panic::<()>(|| panic!("boom")).unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::Panicked("boom".into()));
        assert!(err.is_error());
    }
}
