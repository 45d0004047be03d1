use http::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;

use crate::error::RenderError;
use crate::reason::Reason;
use crate::sink::ResponseSink;

/// Content type written by [`Json`] unless overridden
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Presents a [`Reason`] to the client
///
/// Shared by every request going through a recovery layer, so it must be
/// safe to call concurrently. A renderer that cannot finish its write
/// panics; that panic is not recovered by the layer that invoked it.
///
/// Implemented for any `Fn(&mut ResponseSink, &Reason)`.
pub trait Renderer: Send + Sync {
    /// Write `reason` to `sink`
    fn render(&self, sink: &mut ResponseSink, reason: &Reason);
}

impl<F> Renderer for F
where
    F: Fn(&mut ResponseSink, &Reason) + Send + Sync,
{
    fn render(&self, sink: &mut ResponseSink, reason: &Reason) {
        self(sink, reason);
    }
}

/// Send the reason's status and nothing else
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusOnly;

impl Renderer for StatusOnly {
    fn render(&self, sink: &mut ResponseSink, reason: &Reason) {
        sink.write_status(reason.status());
    }
}

/// Send the reason as a JSON object
///
/// The body is `{"error": "...", "explanation": "..."}`, with `explanation`
/// left out when empty. [`Json::include_status`] adds an integer `status`
/// field between the two.
#[derive(Clone, Debug)]
pub struct Json {
    content_type: HeaderValue,
    include_status: bool,
}

impl Default for Json {
    fn default() -> Self {
        Self {
            content_type: HeaderValue::from_static(JSON_CONTENT_TYPE),
            include_status: false,
        }
    }
}

impl Json {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also serialize the status code into the body
    #[must_use]
    pub const fn include_status(mut self) -> Self {
        self.include_status = true;
        self
    }

    /// Override the `content-type` header
    #[must_use]
    pub fn content_type(mut self, content_type: HeaderValue) -> Self {
        self.content_type = content_type;
        self
    }
}

impl Renderer for Json {
    fn render(&self, sink: &mut ResponseSink, reason: &Reason) {
        sink.insert_header(CONTENT_TYPE, self.content_type.clone());
        sink.write_status(reason.status());

        let mut body = match serde_json::to_vec(&JsonBody::new(reason, self.include_status)) {
            Ok(body) => body,
            Err(e) => std::panic::panic_any(RenderError::from(e)),
        };
        body.push(b'\n');
        sink.write_body(&body);
    }
}

/// Wire shape of a reason
#[derive(Debug, Serialize)]
pub(crate) struct JsonBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<&'a str>,
}

impl<'a> JsonBody<'a> {
    pub(crate) fn new(reason: &'a Reason, include_status: bool) -> Self {
        let explanation = reason.explanation();
        Self {
            error: reason.cause().to_string(),
            status: include_status.then(|| reason.status().as_u16()),
            explanation: (!explanation.is_empty()).then_some(explanation),
        }
    }
}
