use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;

/// Response under construction, written to by a [`Renderer`](crate::Renderer)
///
/// The status can only be written once: later writes are ignored, and
/// writing body bytes before any status implies `200 OK`.
#[derive(Debug, Default)]
pub struct ResponseSink {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseSink {
    /// Empty sink with no status, headers or body
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response status, unless one was already set
    pub fn write_status(&mut self, status: StatusCode) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    /// Set a header, replacing any previous value under the same name
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Append bytes to the response body
    pub fn write_body(&mut self, bytes: &[u8]) {
        self.write_status(StatusCode::OK);
        self.body.extend_from_slice(bytes);
    }

    /// Status written so far
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl IntoResponse for ResponseSink {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}
