use std::sync::Arc;

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, http::HeaderValue};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use studydesk::app::{app, AppState};
use studydesk::auth::SessionKeys;
use studydesk::config::{config, SecurityConfig};
use studydesk::database::{DatabaseManager, MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "studydesk=info,tower_http=info".into()))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!("Starting studydesk in {:?} mode", config.environment);

    let store: Arc<dyn Store> = match config.database.url {
        Some(_) => {
            let pool = DatabaseManager::connect(&config.database).await?;
            if config.database.run_migrations {
                DatabaseManager::migrate(&pool).await?;
            }
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; keeping data in memory for this process only");
            Arc::new(MemoryStore::new())
        }
    };

    let sessions = SessionKeys::from_config(&config.security).context("JWT_SECRET must be set outside development")?;

    let mut router = app(AppState::new(store, sessions)).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("studydesk listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("studydesk stopped");
    Ok(())
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
