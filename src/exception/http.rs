use crate::exception::{ErrorKind, error_response};
use axum::response::Response;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Layer turning a panicking handler into a 500 JSON error response
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

/// Renders a caught panic as a controller contract violation
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    let kind = ErrorKind::ControllerContractError;
    error_response(
        kind.status(),
        kind,
        format!("Controller panicked: {}", detail),
    )
}
