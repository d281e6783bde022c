use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failures a handler cannot turn into a toast. Backend failures are not in
/// here; managers catch those and fall back to an empty state.
#[derive(Debug)]
pub enum ServerError {
    /// The named thing is not in the list the backend gave us.
    NotFound(&'static str),
    Internal(Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::NotFound(what) => {
                tracing::info!(what, "not found");
                (StatusCode::NOT_FOUND, format!("{what} not found"))
                    .into_response()
            }
            ServerError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
                    .into_response()
            }
        }
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
// to turn them into `Result<_, ServerError>`.
impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
