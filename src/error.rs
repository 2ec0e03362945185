// Operation error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::api::envelope::Envelope;
use crate::database::manager::DatabaseError;
use crate::types::{Entity, Operation};
use crate::validation::FieldErrors;

/// Why an action did not succeed.
///
/// Validation and authorization failures are expected outcomes and carry
/// everything the client needs. `Internal` carries nothing about the
/// underlying fault; the fault is logged where the error is built.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Insufficient privileges")]
    Forbidden,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i32 },

    #[error("An error occurred while {} the {}", gerund(.operation), .entity)]
    Internal { operation: Operation, entity: Entity },
}

impl ActionError {
    /// Log a store fault and collapse it into an opaque `Internal` error
    pub fn internal(operation: Operation, entity: Entity, err: DatabaseError) -> Self {
        tracing::error!(error = %err, "Error {} {}", operation.gerund(), entity);
        ActionError::Internal { operation, entity }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Validation(_) => StatusCode::BAD_REQUEST,
            ActionError::Unauthorized => StatusCode::UNAUTHORIZED,
            ActionError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ActionError::Forbidden => StatusCode::FORBIDDEN,
            ActionError::NotFound { .. } => StatusCode::NOT_FOUND,
            ActionError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Opaque code for client handling; validation failures carry field errors instead
    pub fn error_code(&self) -> Option<String> {
        match self {
            ActionError::Validation(_) => None,
            ActionError::Unauthorized => Some("Unauthorized".to_string()),
            ActionError::Forbidden => Some("Forbidden".to_string()),
            ActionError::InvalidCredentials => Some("Invalid credentials".to_string()),
            ActionError::NotFound { .. } => Some("Not found".to_string()),
            ActionError::Internal { operation, entity } => {
                Some(format!("Failed to {} {}", operation.verb(), entity))
            }
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ActionError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn to_envelope(&self) -> Envelope<()> {
        Envelope {
            success: false,
            message: self.to_string(),
            data: None,
            errors: self.field_errors().cloned(),
            error: self.error_code(),
        }
    }
}

fn gerund(operation: &Operation) -> &'static str {
    operation.gerund()
}

impl From<FieldErrors> for ActionError {
    fn from(errors: FieldErrors) -> Self {
        ActionError::Validation(errors)
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ActionError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}
