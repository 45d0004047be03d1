use std::error::Error as StdError;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::render::{JsonBody, Renderer, StatusOnly};
use crate::sink::ResponseSink;

/// Boxed error accepted as the cause of a [`Reason`]
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Reason to abort from inside an HTTP handler
///
/// Pairs the underlying cause with the status of the response that should
/// be served for it, and an optional explanation for the client. Built with
/// [`because`] and immutable afterwards.
///
/// Displays as its status; the cause is its error source.
#[derive(Debug, Error)]
#[error("{status}")]
pub struct Reason {
    #[source]
    cause: BoxError,
    status: StatusCode,
    explanation: String,
}

impl Reason {
    /// Reason with no details: `500 Internal Server Error`, no explanation
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            cause: cause.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            explanation: String::new(),
        }
    }

    /// Apply one more detail, consuming the reason
    #[must_use]
    pub fn with(mut self, detail: Detail) -> Self {
        match detail {
            Detail::Status(status) => self.status = status,
            Detail::Explanation(explanation) => self.explanation = explanation,
        }
        self
    }

    /// Underlying cause
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.cause
    }

    /// Status of the response served for this reason
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Explanation for the client, empty when none was given
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        JsonBody::new(self, false).serialize(serializer)
    }
}

/// Status-only response, for handlers returning `Result<_, Reason>`
impl IntoResponse for Reason {
    fn into_response(self) -> Response {
        let mut sink = ResponseSink::new();
        StatusOnly.render(&mut sink, &self);
        sink.into_response()
    }
}

/// Detail about a [`Reason`], applied while it is being built
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Detail {
    /// Explicit response status
    Status(StatusCode),
    /// Explanation for the client
    Explanation(String),
}

/// Set an explicit HTTP status on the reason, overriding the 500 default
pub const fn with_status(status: StatusCode) -> Detail {
    Detail::Status(status)
}

/// Set an explanation for the client on the reason
pub fn with_explanation(explanation: impl Into<String>) -> Detail {
    Detail::Explanation(explanation.into())
}

/// Describe why a handler is aborting
///
/// Unless a status is set with [`with_status`], `500 Internal Server Error`
/// is assumed. Details are applied in order, so the last one to set a field
/// wins.
pub fn because<E, I>(cause: E, details: I) -> Reason
where
    E: Into<BoxError>,
    I: IntoIterator<Item = Detail>,
{
    details.into_iter().fold(Reason::new(cause), Reason::with)
}
