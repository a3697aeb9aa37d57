//! Request-time error boundary
//!
//! Every handler returns `Result<_, HandlerError>`. The error is classified
//! into an [`ErrorKind`], logged, and rendered as an [`ErrorResponse`] with
//! a matching status code. Panics inside controllers are caught by the layer
//! built in [`http::catch_panic_layer`] and rendered the same way.

use crate::common::ErrorResponse;
use crate::controller::ControllerError;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strum_macros::Display;
use thiserror::Error;

pub mod http;

/// Failure class reported in the `error` field of an error response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    ClientInputError,
    NotFound,
    ControllerContractError,
    ControllerError,
    #[strum(serialize = "IOError")]
    IoError,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::ClientInputError => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ControllerContractError
            | ErrorKind::ControllerError
            | ErrorKind::IoError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("Unreadable request body: {0}")]
    UnreadableBody(#[source] BytesRejection),

    #[error("Resource id not found in request path")]
    MissingId,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Controller contract violated: {0}")]
    Contract(String),

    #[error("Controller failed: {0:#}")]
    Controller(anyhow::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl HandlerError {
    pub fn contract(message: impl Into<String>) -> Self {
        HandlerError::Contract(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HandlerError::MalformedBody(_)
            | HandlerError::UnreadableBody(_)
            | HandlerError::MissingId => {
                ErrorKind::ClientInputError
            }
            HandlerError::NotFound(_) => ErrorKind::NotFound,
            HandlerError::Contract(_) => ErrorKind::ControllerContractError,
            HandlerError::Controller(_) => ErrorKind::ControllerError,
            HandlerError::Encode(_) => ErrorKind::IoError,
        }
    }

    /// Status of the response; body rejections keep axum's own status (`413`
    /// for an oversized body)
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::UnreadableBody(rejection) => rejection.status(),
            _ => self.kind().status(),
        }
    }
}

impl From<ControllerError> for HandlerError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::NotFound(id) => HandlerError::NotFound(id),
            ControllerError::Other(err) => HandlerError::Controller(err),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, kind = %kind, "Request failed");
        } else {
            tracing::warn!(error = %self, kind = %kind, "Request rejected");
        }

        error_response(status, kind, self.to_string())
    }
}

pub(crate) fn error_response(status: StatusCode, kind: ErrorKind, message: String) -> Response {
    let body = ErrorResponse::new(status.as_u16(), kind.to_string(), message);
    (status, Json(body)).into_response()
}
