//! Web-layer error type.
//!
//! Only storage and runtime failures become errors here. Domain outcomes
//! (short title, unknown id) are handled as flash messages and never reach
//! this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tasklist_core::StoreError;

pub type WebResult<T> = Result<T, WebError>;

#[derive(Debug)]
pub enum WebError {
    Store(StoreError),
    Join(tokio::task::JoinError),
    LockPoisoned,
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Join(err) => write!(f, "blocking task failed: {err}"),
            Self::LockPoisoned => f.write_str("task service lock poisoned"),
        }
    }
}

impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Join(err) => Some(err),
            Self::LockPoisoned => None,
        }
    }
}

impl From<StoreError> for WebError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<tokio::task::JoinError> for WebError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Join(value)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("event=http_request_failed module=web status=error error={self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
