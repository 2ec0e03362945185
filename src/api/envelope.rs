use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::error::ActionError;
use crate::validation::FieldErrors;

/// Outcome of every action
pub type ActionResult<T> = Result<Success<T>, ActionError>;

/// Uniform response body: `{success, message, data?, errors?, error?}`
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// Failure carrying only a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
            error: None,
        }
    }
}

/// Successful action result, rendered with the success envelope
#[derive(Debug)]
pub struct Success<T: Serialize> {
    pub message: String,
    pub data: T,
    status_code: Option<StatusCode>,
}

impl<T: Serialize> Success<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
            status_code: None, // Default to 200 OK
        }
    }

    /// Render with a custom status code
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Render as 201 Created
    pub fn created(self) -> Self {
        self.with_status(StatusCode::CREATED)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code.unwrap_or(StatusCode::OK)
    }

    pub fn into_envelope(self) -> Envelope<T> {
        Envelope {
            success: true,
            message: self.message,
            data: Some(self.data),
            errors: None,
            error: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.into_envelope())).into_response()
    }
}
