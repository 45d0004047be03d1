//! Handlers that give up in every way the recovery layer knows about

use std::io;

use axum::Router;
use axum::extract::Path;
use axum::routing::get;
use http::StatusCode;
use panic_response::{BoxError, Reason, because, raise, raise_error, raise_with, with_explanation, with_status};

async fn looks_good() -> &'static str {
    "Looks good!"
}

async fn created() -> (StatusCode, &'static str) {
    (StatusCode::CREATED, "made it")
}

async fn bad_request() -> &'static str {
    validate("not a number")
}

fn validate(input: &str) -> &'static str {
    if input.parse::<u32>().is_err() {
        raise_with(
            io::Error::other("user made a bad request"),
            [with_status(StatusCode::BAD_REQUEST), with_explanation("expected a number")],
        );
    }
    "valid"
}

async fn oops() -> &'static str {
    panic!("oops")
}

async fn formatted(Path(code): Path<u32>) -> &'static str {
    panic!("failed with code {code}")
}

async fn boxed_error() -> &'static str {
    let error: BoxError = Box::new(io::Error::other("disk on fire"));
    raise(error)
}

async fn raised_error() -> &'static str {
    raise_error(io::Error::new(io::ErrorKind::PermissionDenied, "not yours"))
}

async fn anyhow_error() -> &'static str {
    raise(anyhow::anyhow!("upstream went away"))
}

async fn unknown_payload() -> &'static str {
    std::panic::panic_any(())
}

async fn returned_reason() -> Result<&'static str, Reason> {
    Err(because("gone fishing", [with_status(StatusCode::SERVICE_UNAVAILABLE)]))
}

/// Fails with a status and explanation derived from the id, so concurrent
/// callers can tell their responses apart
async fn numbered(Path(id): Path<u16>) -> &'static str {
    let status = StatusCode::from_u16(400 + id % 20).unwrap_or(StatusCode::BAD_REQUEST);
    raise_with(
        format!("request {id} failed"),
        [with_status(status), with_explanation(format!("id {id}"))],
    )
}

/// Router exposing every handler, without any recovery layer
pub fn app() -> Router {
    Router::new()
        .route("/ok", get(looks_good))
        .route("/created", get(created))
        .route("/bad", get(bad_request))
        .route("/oops", get(oops))
        .route("/formatted/{code}", get(formatted))
        .route("/boxed", get(boxed_error))
        .route("/raised", get(raised_error))
        .route("/anyhow", get(anyhow_error))
        .route("/unknown", get(unknown_payload))
        .route("/returned", get(returned_reason))
        .route("/numbered/{id}", get(numbered))
}
