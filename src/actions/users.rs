use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::{ActionResult, Success};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{Caller, SessionKeys};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User};
use crate::database::store::{Store, UserStore};
use crate::error::ActionError;
use crate::types::{Entity, Operation, Role};
use crate::validation::{user, FieldErrors, RawInput};

/// A freshly issued session token and the account it belongs to
#[derive(Debug, Clone, Serialize)]
pub struct SessionGrant {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: User,
}

/// Validate credentials, hash the password and insert the account
pub async fn provision(store: &dyn Store, input: &RawInput, role: Role) -> ActionResult<User> {
    let credentials = user::validate_registration(input)?;

    let password = hash_password(&credentials.password).map_err(|e| {
        error!(error = %e, "Error hashing password");
        ActionError::Internal { operation: Operation::Create, entity: Entity::User }
    })?;

    let new_user = NewUser {
        id: Uuid::new_v4().to_string(),
        email: credentials.email,
        password,
        role,
    };

    let user = match store.insert_user(new_user).await {
        Ok(user) => user,
        Err(DatabaseError::Conflict(_)) => {
            return Err(FieldErrors::single("email", "Email is already registered").into());
        }
        Err(e) => return Err(ActionError::internal(Operation::Create, Entity::User, e)),
    };

    info!(user_id = %user.id, role = ?user.role, "Provisioned user");
    Ok(Success::new("User created successfully", user).created())
}

/// Self-service registration: always a STUDENT, signed in straight away
pub async fn sign_up(store: &dyn Store, sessions: &SessionKeys, input: &RawInput) -> ActionResult<SessionGrant> {
    let created = provision(store, input, Role::Student).await?;
    let grant = grant(sessions, created.data, Operation::Create)?;
    Ok(Success::new("Account created successfully", grant).created())
}

pub async fn sign_in(store: &dyn Store, sessions: &SessionKeys, input: &RawInput) -> ActionResult<SessionGrant> {
    let credentials = user::validate_sign_in(input)?;

    let found = store
        .find_user_by_email(&credentials.email)
        .await
        .map_err(|e| ActionError::internal(Operation::Select, Entity::User, e))?;

    let user = match found {
        Some(user) if verify_password(&credentials.password, &user.password) => user,
        _ => {
            warn!(email = %credentials.email, "Rejected sign-in");
            return Err(ActionError::InvalidCredentials);
        }
    };

    info!(user_id = %user.id, "User signed in");
    Ok(Success::new("Signed in successfully", grant(sessions, user, Operation::Select)?))
}

pub fn whoami(caller: &Caller) -> ActionResult<User> {
    let user = caller.require()?;
    Ok(Success::new("User fetched successfully", user.clone()))
}

/// All accounts; ADMIN only
pub async fn list(store: &dyn Store, caller: &Caller) -> ActionResult<Vec<User>> {
    caller.require_admin()?;
    let users = store
        .list_users()
        .await
        .map_err(|e| ActionError::internal(Operation::Select, Entity::User, e))?;
    Ok(Success::new("Users fetched successfully", users))
}

fn grant(sessions: &SessionKeys, user: User, operation: Operation) -> Result<SessionGrant, ActionError> {
    let token = sessions.issue(&user).map_err(|e| {
        error!(error = %e, "Error issuing session token");
        ActionError::Internal { operation, entity: Entity::User }
    })?;
    Ok(SessionGrant {
        token,
        expires_in: sessions.ttl_secs(),
        user,
    })
}
