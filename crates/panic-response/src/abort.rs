use std::any::Any;
use std::panic;

use crate::reason::{BoxError, Detail, Reason, because};

/// Panic payload, sorted by what the recovery layer can do with it
///
/// Only [`BoxError`] and [`anyhow::Error`] count as errors. A panic carrying
/// any other concrete error type, such as a bare `std::io::Error`, is
/// [`Abort::Unknown`]; raise it with [`raise_error`] to have it boxed.
#[derive(Debug)]
pub enum Abort {
    /// Already a [`Reason`], rendered as-is
    Reason(Reason),
    /// An error, rendered as a `500` with no explanation
    Cause(BoxError),
    /// A message, turned into an error and rendered like [`Abort::Cause`]
    Text(String),
    /// Anything else; never rendered, the panic is resumed instead
    Unknown(Box<dyn Any + Send>),
}

impl Abort {
    /// Sort a payload returned by [`std::panic::catch_unwind`]
    ///
    /// Recognizes [`Reason`], [`BoxError`], [`anyhow::Error`], `String` and
    /// `&'static str`. The last two are what `panic!` produces with and
    /// without format arguments.
    pub fn classify(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Reason>() {
            Ok(reason) => return Self::Reason(*reason),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<BoxError>() {
            Ok(error) => return Self::Cause(*error),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<anyhow::Error>() {
            Ok(error) => return Self::Cause((*error).into()),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<String>() {
            Ok(text) => return Self::Text(*text),
            Err(payload) => payload,
        };
        match payload.downcast::<&'static str>() {
            Ok(text) => Self::Text((*text).to_owned()),
            Err(payload) => Self::Unknown(payload),
        }
    }

    /// Convert to a [`Reason`], handing back the payload if it is unknown
    ///
    /// # Errors
    ///
    /// Returns the original payload for [`Abort::Unknown`]
    pub fn into_reason(self) -> Result<Reason, Box<dyn Any + Send>> {
        match self {
            Self::Reason(reason) => Ok(reason),
            Self::Cause(error) => Ok(Reason::new(error)),
            Self::Text(text) => Ok(Reason::new(text)),
            Self::Unknown(payload) => Err(payload),
        }
    }
}

impl From<Reason> for Abort {
    fn from(reason: Reason) -> Self {
        Self::Reason(reason)
    }
}

impl From<BoxError> for Abort {
    fn from(error: BoxError) -> Self {
        Self::Cause(error)
    }
}

impl From<anyhow::Error> for Abort {
    fn from(error: anyhow::Error) -> Self {
        Self::Cause(error.into())
    }
}

impl From<String> for Abort {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Abort {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Abort the current handler
///
/// Panics with a payload the recovery layer recognizes. An
/// [`Abort::Unknown`] payload is resumed as-is.
///
/// # Panics
///
/// Always.
pub fn raise(abort: impl Into<Abort>) -> ! {
    match abort.into() {
        Abort::Reason(reason) => panic::panic_any(reason),
        Abort::Cause(error) => panic::panic_any(error),
        Abort::Text(text) => panic::panic_any(text),
        Abort::Unknown(payload) => panic::resume_unwind(payload),
    }
}

/// Abort the current handler with an error of any type
///
/// The error is boxed so the recovery layer recognizes it and renders a
/// `500` whose cause downcasts back to `E`.
///
/// # Panics
///
/// Always.
pub fn raise_error<E: Into<BoxError>>(error: E) -> ! {
    panic::panic_any(error.into())
}

/// Abort the current handler with [`because`]`(cause, details)`
///
/// # Panics
///
/// Always.
pub fn raise_with<E, I>(cause: E, details: I) -> !
where
    E: Into<BoxError>,
    I: IntoIterator<Item = Detail>,
{
    raise(because(cause, details))
}
