//! Persistence operations.
//!
//! Every action takes the store and the resolved [`Caller`](crate::auth::Caller)
//! explicitly and returns an [`ActionResult`](crate::api::ActionResult). Store
//! faults are logged and collapsed into `ActionError::Internal` here, once,
//! and never retried.

pub mod exams;
pub mod journals;
pub mod users;

use serde::Serialize;

use crate::database::store::{Store, UserStore};
use crate::error::ActionError;
use crate::types::{Entity, Operation};
use crate::validation::FieldErrors;

/// Payload of a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub id: i32,
}

/// Entries must belong to a real user; report a missing one against `userId`
pub(crate) async fn ensure_owner_exists(
    store: &dyn Store,
    user_id: &str,
    entity: Entity,
) -> Result<(), ActionError> {
    match store.find_user(user_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(FieldErrors::single("userId", "User not found").into()),
        Err(err) => Err(ActionError::internal(Operation::Create, entity, err)),
    }
}
