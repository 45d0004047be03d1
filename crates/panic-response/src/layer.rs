use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use tower::Layer;
use tower_http::catch_panic::{CatchPanic, CatchPanicLayer, ResponseForPanic};

use crate::abort::Abort;
use crate::render::{Renderer, StatusOnly};
use crate::sink::ResponseSink;

/// Service that recovers panics raised by the service it wraps
///
/// Built with [`gracefully`], [`gracefully_render`] or [`GracefullyLayer`].
/// Panics are caught both while calling the inner service and while polling
/// its future.
pub type Gracefully<S, R = StatusOnly> = CatchPanic<S, RenderPanic<R>>;

/// Wrap `inner` so that recognized panics become status-only responses
///
/// See [`gracefully_render`] for which panics are recovered.
pub fn gracefully<S>(inner: S) -> Gracefully<S> {
    gracefully_render(inner, StatusOnly)
}

/// Wrap `inner` so that recognized panics are rendered with `renderer`
///
/// A panic carrying a [`Reason`](crate::Reason), a
/// [`BoxError`](crate::BoxError), an [`anyhow::Error`], a `String` or a
/// `&'static str` is converted to a reason and rendered into the response.
/// Any other payload, including a concrete error type that was not boxed
/// (see [`raise_error`](crate::raise_error)), is assumed to have been raised
/// on purpose and is resumed. Panics raised by the renderer itself are not
/// caught.
pub fn gracefully_render<S, R: Renderer>(inner: S, renderer: R) -> Gracefully<S, R> {
    CatchPanic::custom(inner, RenderPanic::new(renderer))
}

/// Run `handler`, rendering its panic with `renderer` if it has a
/// recognized payload
///
/// # Panics
///
/// Resumes the handler's panic when the payload is not recognized, and
/// propagates any panic from the renderer.
pub fn recover<R, F, T>(renderer: &R, handler: F) -> Response
where
    R: Renderer + ?Sized,
    F: FnOnce() -> T,
    T: IntoResponse,
{
    match panic::catch_unwind(AssertUnwindSafe(handler)) {
        Ok(response) => response.into_response(),
        Err(payload) => render_abort(renderer, payload),
    }
}

fn render_abort<R: Renderer + ?Sized>(renderer: &R, payload: Box<dyn Any + Send>) -> Response {
    match Abort::classify(payload).into_reason() {
        Ok(reason) => {
            tracing::debug!(status = reason.status().as_u16(), cause = %reason.cause(), "recovered handler panic");
            let mut sink = ResponseSink::new();
            renderer.render(&mut sink, &reason);
            sink.into_response()
        }
        Err(payload) => {
            tracing::warn!("handler panicked with an unrecognized payload, resuming");
            panic::resume_unwind(payload)
        }
    }
}

/// Panic handler for [`CatchPanic`] that renders recognized payloads
pub struct RenderPanic<R = StatusOnly> {
    renderer: Arc<R>,
}

impl<R: Renderer> RenderPanic<R> {
    /// Handler rendering with `renderer`
    pub fn new(renderer: R) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }
}

impl<R> Clone for RenderPanic<R> {
    fn clone(&self) -> Self {
        Self {
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<R: Renderer> ResponseForPanic for RenderPanic<R> {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> http::Response<Self::ResponseBody> {
        render_abort(self.renderer.as_ref(), err)
    }
}

/// Layer applying [`Gracefully`] to the services it wraps
pub struct GracefullyLayer<R = StatusOnly> {
    inner: CatchPanicLayer<RenderPanic<R>>,
}

impl GracefullyLayer {
    /// Layer using the status-only renderer
    pub fn new() -> Self {
        Self::with_renderer(StatusOnly)
    }
}

impl Default for GracefullyLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> GracefullyLayer<R> {
    /// Layer using a custom renderer
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            inner: CatchPanicLayer::custom(RenderPanic::new(renderer)),
        }
    }
}

impl<R> Clone for GracefullyLayer<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S, R> Layer<S> for GracefullyLayer<R> {
    type Service = Gracefully<S, R>;

    fn layer(&self, inner: S) -> Self::Service {
        self.inner.layer(inner)
    }
}
