use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
    Extension,
};

use crate::api::Envelope;
use crate::auth::Caller;

/// Where non-admin callers land when they try an /admin route
pub const ADMIN_FALLBACK: &str = "/dashboard";

const ADMIN_PREFIX: &str = "/admin";
const API_PREFIX: &str = "/api";

/// Prefix gates, applied to every request after the session is resolved.
///
/// Runs as an outer layer so unregistered paths under a gated prefix are
/// gated too, not just the routes that exist.
pub async fn access_gates(Extension(caller): Extension<Caller>, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if under_prefix(path, ADMIN_PREFIX) {
        return require_admin(&caller, request, next).await;
    }
    if under_prefix(path, API_PREFIX) {
        return require_authorization_header(request, next).await;
    }
    next.run(request).await
}

/// /admin/* gate: anyone but an ADMIN is sent back to the dashboard
async fn require_admin(caller: &Caller, request: Request, next: Next) -> Response {
    if caller.is_admin() {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "Redirecting non-admin caller");
    Redirect::temporary(ADMIN_FALLBACK).into_response()
}

/// /api/* gate: the Authorization header must at least be present
async fn require_authorization_header(request: Request, next: Next) -> Response {
    if request.headers().contains_key(AUTHORIZATION) {
        return next.run(request).await;
    }

    let body: Envelope<()> = Envelope::failure("Authorization header is required");
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// `prefix` itself or anything below it, segment-wise
fn under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
