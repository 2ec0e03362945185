// handlers/public/auth.rs - POST /auth/signup, /auth/signin, /auth/signout

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Json, Response},
};

use crate::actions::users;
use crate::api::Success;
use crate::app::AppState;
use crate::auth::SESSION_COOKIE;
use crate::error::ActionError;
use crate::validation::RawInput;

/// POST /auth/signup - Create a STUDENT account and sign it in
///
/// Body: `{"email": "...", "password": "..."}`. Responds 201 with
/// `{token, expires_in, user}` and sets the session cookie.
pub async fn signup(State(state): State<AppState>, Json(input): Json<RawInput>) -> Result<Response, ActionError> {
    let success = users::sign_up(state.store.as_ref(), &state.sessions, &input).await?;
    let cookie = session_cookie(&success.data.token, success.data.expires_in);
    Ok(([(SET_COOKIE, cookie)], success).into_response())
}

/// POST /auth/signin - Exchange credentials for a session token
pub async fn signin(State(state): State<AppState>, Json(input): Json<RawInput>) -> Result<Response, ActionError> {
    let success = users::sign_in(state.store.as_ref(), &state.sessions, &input).await?;
    let cookie = session_cookie(&success.data.token, success.data.expires_in);
    Ok(([(SET_COOKIE, cookie)], success).into_response())
}

/// POST /auth/signout - Expire the session cookie. Bearer tokens simply lapse.
pub async fn signout() -> Response {
    let cookie = session_cookie("", 0);
    ([(SET_COOKIE, cookie)], Success::new("Signed out successfully", ())).into_response()
}

fn session_cookie(token: &str, max_age: i64) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age
    )
}
