// handlers/elevated/users.rs - GET /admin/users

use axum::{extract::State, Extension};

use crate::actions::users;
use crate::api::ActionResult;
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::models::User;

/// GET /admin/users - every account, newest first
pub async fn list(State(state): State<AppState>, Extension(caller): Extension<Caller>) -> ActionResult<Vec<User>> {
    users::list(state.store.as_ref(), &caller).await
}
