//! HTTP mapping for core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use metricd_core::error::{ClientCode, CollectorError};

/// Response wrapper around [`CollectorError`]: status from the client code,
/// body is the error's display text.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub CollectorError);

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::NotImplemented => StatusCode::NOT_IMPLEMENTED,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (status_for(self.0.client_code()), self.0.to_string()).into_response()
    }
}
