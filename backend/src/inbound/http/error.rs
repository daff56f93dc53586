//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain [`Error`] type HTTP-agnostic while letting Actix
//! handlers turn failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use tracing::error;

use crate::domain::ports::{AppointmentRepositoryError, IntakeRepositoryError};
use crate::domain::{Error, ErrorCode};

pub use crate::domain::ApiResult;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal messages may carry connection strings or SQL fragments; replace
/// them with a generic payload but keep the trace id for correlation.
fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<AppointmentRepositoryError> for Error {
    fn from(err: AppointmentRepositoryError) -> Self {
        error!(error = %err, "appointment repository failure");
        Self::internal(err.to_string())
    }
}

impl From<IntakeRepositoryError> for Error {
    fn from(err: IntakeRepositoryError) -> Self {
        error!(error = %err, "intake repository failure");
        Self::internal(err.to_string())
    }
}

/// JSON extractor configuration producing the shared error envelope for
/// missing, empty, or malformed request bodies.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Form extractor configuration matching [`json_config`].
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid form body: {err}")).into()
    })
}
