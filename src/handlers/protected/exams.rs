// handlers/protected/exams.rs - /api/exams and /api/exams/:id

use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};

use crate::actions::{exams, Deleted};
use crate::api::ActionResult;
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::models::{Exam, ExamWithUser};
use crate::validation::RawInput;

/// GET /api/exams
pub async fn list(State(state): State<AppState>) -> ActionResult<Vec<ExamWithUser>> {
    exams::list(state.store.as_ref()).await
}

/// POST /api/exams - 201 with the created exam, 400 with field errors
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<RawInput>,
) -> ActionResult<Exam> {
    exams::create(state.store.as_ref(), &caller, &input).await
}

/// GET /api/exams/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> ActionResult<ExamWithUser> {
    exams::get(state.store.as_ref(), id).await
}

/// PATCH /api/exams/:id - only the supplied fields change
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    Json(input): Json<RawInput>,
) -> ActionResult<Exam> {
    exams::update(state.store.as_ref(), &caller, id, &input).await
}

/// DELETE /api/exams/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> ActionResult<Deleted> {
    exams::delete(state.store.as_ref(), &caller, id).await
}
