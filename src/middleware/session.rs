use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::auth::{Caller, SESSION_COOKIE};
use crate::database::store::UserStore;

/// Resolve the caller once per request and hand it to handlers as an `Extension<Caller>`.
///
/// A missing, invalid or expired token, or one naming a user that no longer
/// exists, yields an anonymous caller rather than an error; the gates and
/// actions decide what anonymous callers may do.
pub async fn resolve_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let caller = match extract_token(request.headers()) {
        Some(token) => identify(&state, &token).await,
        None => Caller::anonymous(),
    };

    request.extensions_mut().insert(caller);
    next.run(request).await
}

async fn identify(state: &AppState, token: &str) -> Caller {
    let claims = match state.sessions.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Ignoring session token");
            return Caller::anonymous();
        }
    };

    match state.store.find_user(&claims.sub).await {
        Ok(Some(user)) => Caller::user(user),
        Ok(None) => {
            debug!(user_id = %claims.sub, "Session names an unknown user");
            Caller::anonymous()
        }
        Err(e) => {
            warn!(error = %e, "Error loading session user");
            Caller::anonymous()
        }
    }
}

/// Bearer token from the Authorization header, falling back to the session cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}
