use tracing::info;

use crate::api::{ActionResult, Success};
use crate::auth::Caller;
use crate::database::models::{Exam, ExamWithUser};
use crate::database::store::{ExamStore, Store};
use crate::error::ActionError;
use crate::types::{Entity, Operation};
use crate::validation::{exam, RawInput};

use super::{ensure_owner_exists, Deleted};

pub async fn create(store: &dyn Store, caller: &Caller, input: &RawInput) -> ActionResult<Exam> {
    caller.require()?;
    let new_exam = exam::validate_new(input)?;
    ensure_owner_exists(store, &new_exam.user_id, Entity::Exam).await?;

    let exam = store
        .insert_exam(new_exam)
        .await
        .map_err(|e| ActionError::internal(Operation::Create, Entity::Exam, e))?;

    info!(exam_id = exam.id, user_id = %exam.user_id, "Created exam");
    Ok(Success::new("exam created successfully", exam).created())
}

/// Single exam with its owner joined
pub async fn get(store: &dyn Store, id: i32) -> ActionResult<ExamWithUser> {
    match store.find_exam(id).await {
        Ok(Some(exam)) => Ok(Success::new("exam fetched successfully", exam)),
        Ok(None) => Err(ActionError::NotFound { entity: Entity::Exam, id }),
        Err(e) => Err(ActionError::internal(Operation::Select, Entity::Exam, e)),
    }
}

/// Every exam, newest first. Not scoped to the caller.
pub async fn list(store: &dyn Store) -> ActionResult<Vec<ExamWithUser>> {
    let exams = store
        .list_exams()
        .await
        .map_err(|e| ActionError::internal(Operation::Select, Entity::Exam, e))?;
    Ok(Success::new("exams fetched successfully", exams))
}

/// Partial update: only the fields present in `input` are written.
pub async fn update(store: &dyn Store, caller: &Caller, id: i32, input: &RawInput) -> ActionResult<Exam> {
    caller.require()?;
    let changes = exam::validate_changes(input)?;

    let result = if changes.is_empty() {
        store.find_exam(id).await.map(|found| found.map(|row| row.exam))
    } else {
        store.update_exam(id, &changes).await
    };

    match result.map_err(|e| ActionError::internal(Operation::Update, Entity::Exam, e))? {
        Some(exam) => {
            info!(exam_id = exam.id, "Updated exam");
            Ok(Success::new("exam updated successfully", exam))
        }
        None => Err(ActionError::NotFound { entity: Entity::Exam, id }),
    }
}

/// Deleting an exam that is already gone still succeeds
pub async fn delete(store: &dyn Store, caller: &Caller, id: i32) -> ActionResult<Deleted> {
    caller.require()?;
    let removed = store
        .delete_exam(id)
        .await
        .map_err(|e| ActionError::internal(Operation::Delete, Entity::Exam, e))?;

    info!(exam_id = id, removed, "Deleted exam");
    Ok(Success::new("exam deleted successfully", Deleted { id }))
}
