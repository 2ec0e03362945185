// handlers/protected/journal.rs - /api/journal and /api/journal/:id
//
// The collection endpoints answer with bare JSON (an array, or
// `{message, journal}` / `{error}`) for the journal widget; the item
// endpoints use the regular envelope.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::{json, Value};

use crate::actions::{journals, Deleted};
use crate::api::ActionResult;
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::models::Journal;
use crate::error::ActionError;
use crate::validation::RawInput;

const MISSING_FIELDS: &str = "Sleep hours and userId are required";
const INVALID_FIELDS: &str = "Validation failed";
const REQUIRED_FIELDS: [&str; 2] = ["sleepHours", "userId"];

/// GET /api/journal - every entry as a bare array
pub async fn list(State(state): State<AppState>) -> Response {
    match journals::list(state.store.as_ref()).await {
        Ok(success) => Json(success.data).into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch journals" })),
        )
            .into_response(),
    }
}

/// POST /api/journal
///
/// 201 `{message, journal}`; 400 `{error, errors}` when validation fails;
/// otherwise `{error}` with the failure's status.
///
/// The `/api` gate only checks that an Authorization header is present. This
/// route also needs the header (or cookie) to resolve to a signed-in user: an
/// unknown or expired token answers 401 `{"error": "Unauthorized"}`.
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<RawInput>,
) -> Response {
    match journals::create(state.store.as_ref(), &caller, &input).await {
        Ok(success) => (
            success.status_code(),
            Json(json!({ "message": success.message, "journal": success.data })),
        )
            .into_response(),
        Err(ActionError::Validation(errors)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": validation_summary(&input), "errors": errors })),
        )
            .into_response(),
        Err(err) => {
            let error = err.error_code().unwrap_or_else(|| err.to_string());
            (err.status_code(), Json(json!({ "error": error }))).into_response()
        }
    }
}

/// The missing-fields summary only when a required field is actually absent
fn validation_summary(input: &RawInput) -> &'static str {
    let absent = |field: &str| match input.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    };

    if REQUIRED_FIELDS.iter().any(|field| absent(field)) {
        MISSING_FIELDS
    } else {
        INVALID_FIELDS
    }
}

/// GET /api/journal/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> ActionResult<Journal> {
    journals::get(state.store.as_ref(), id).await
}

/// PATCH /api/journal/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(input): Json<RawInput>,
) -> ActionResult<Journal> {
    journals::update(state.store.as_ref(), &caller, id, &input).await
}

/// DELETE /api/journal/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> ActionResult<Deleted> {
    journals::delete(state.store.as_ref(), &caller, id).await
}
