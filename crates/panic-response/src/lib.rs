//! Turn panics raised by HTTP handlers into HTTP responses
//!
//! A handler gives up at any depth by panicking with a [`Reason`], a
//! [`BoxError`], an [`anyhow::Error`] or a string. The [`Gracefully`]
//! middleware catches the panic, converts it to a [`Reason`] and renders it
//! with a [`Renderer`]. Panics with any other payload are resumed untouched,
//! including other concrete error types; raise those with [`raise_error`].
//!
//! ```no_run
//! use axum::{Router, routing::get};
//! use http::StatusCode;
//! use panic_response::{GracefullyLayer, Json, raise_with, with_status};
//!
//! async fn handler() -> &'static str {
//!     raise_with("user made a bad request", [with_status(StatusCode::BAD_REQUEST)])
//! }
//!
//! let app: Router = Router::new()
//!     .route("/", get(handler))
//!     .layer(GracefullyLayer::with_renderer(Json::new()));
//! ```

#![allow(clippy::must_use_candidate)]

mod abort;
mod config;
mod error;
mod layer;
mod reason;
mod render;
mod sink;

pub use abort::{Abort, raise, raise_error, raise_with};
pub use config::{ConfiguredRenderer, RecoveryConfig, RenderFormat};
pub use error::{ConfigError, RenderError};
pub use layer::{Gracefully, GracefullyLayer, RenderPanic, gracefully, gracefully_render, recover};
pub use reason::{BoxError, Detail, Reason, because, with_explanation, with_status};
pub use render::{JSON_CONTENT_TYPE, Json, Renderer, StatusOnly};
pub use sink::ResponseSink;
