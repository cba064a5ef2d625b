use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::search::SearchError;

pub struct ResponseError(Response);

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        self.0
    }
}

impl<E> From<E> for ResponseError
where
    E: Into<color_eyre::eyre::Error>,
{
    fn from(value: E) -> Self {
        let report = Into::<color_eyre::eyre::Error>::into(value);
        error!(error = ?report, "request failed");
        Self((StatusCode::INTERNAL_SERVER_ERROR, report.to_string()).into_response())
    }
}

impl ResponseError {
    pub fn with_status<T>(status_code: StatusCode, data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((status_code, data).into_response())
    }

    pub fn bad_request<T>(data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((StatusCode::BAD_REQUEST, data).into_response())
    }

    pub fn not_found<T>(data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((StatusCode::NOT_FOUND, data).into_response())
    }

    /// Storage details are already logged by the search; only the
    /// generic message goes back to the client.
    pub fn from_search(err: SearchError) -> Self {
        Self::with_status(err.status(), err.to_string())
    }
}

pub type Result<T, E = ResponseError> = axum::response::Result<T, E>;
