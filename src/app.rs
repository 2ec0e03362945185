use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::SessionKeys;
use crate::database::store::Store;
use crate::handlers::{dashboard, elevated, protected, public};
use crate::middleware::{access_gates, resolve_session};

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionKeys>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, sessions: SessionKeys) -> Self {
        Self {
            store,
            sessions: Arc::new(sessions),
        }
    }
}

/// Full router. CORS and body limits are left to the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/dashboard", get(dashboard::show))
        .merge(auth_public_routes())
        // Gated tiers
        .merge(api_routes())
        .merge(admin_routes())
        // Global middleware; the session resolves before the prefix gates run
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), resolve_session))
                .layer(middleware::from_fn(access_gates)),
        )
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
        .route("/auth/signout", post(auth::signout))
}

fn api_routes() -> Router<AppState> {
    use protected::{auth, exams, journal};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/exams", get(exams::list).post(exams::create))
        .route(
            "/api/exams/:id",
            get(exams::get).patch(exams::update).delete(exams::delete),
        )
        .route("/api/journal", get(journal::list).post(journal::create))
        .route(
            "/api/journal/:id",
            get(journal::get).patch(journal::update).delete(journal::delete),
        )
}

fn admin_routes() -> Router<AppState> {
    use elevated::users;

    Router::new().route("/admin/users", get(users::list))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "message": "studydesk",
        "data": {
            "name": "studydesk",
            "version": version,
            "endpoints": {
                "auth": "/auth/signup, /auth/signin, /auth/signout (public)",
                "dashboard": "/dashboard (session)",
                "exams": "/api/exams[/:id] (Authorization header)",
                "journal": "/api/journal[/:id] (Authorization header)",
                "whoami": "/api/auth/whoami (Authorization header)",
                "admin": "/admin/users (ADMIN only)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "ok",
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "database unavailable",
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
