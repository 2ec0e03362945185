// handlers/protected/auth.rs - GET /api/auth/whoami

use axum::Extension;

use crate::actions::users;
use crate::api::ActionResult;
use crate::auth::Caller;
use crate::database::models::User;

pub async fn whoami(Extension(caller): Extension<Caller>) -> ActionResult<User> {
    users::whoami(&caller)
}
