#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use studydesk::actions::users;
use studydesk::app::{app, AppState};
use studydesk::auth::SessionKeys;
use studydesk::database::models::User;
use studydesk::database::MemoryStore;
use studydesk::types::Role;

const SECRET: &str = "integration-secret";

/// Router over a fresh in-memory store, driven with `oneshot`
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    keys: SessionKeys,
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), SessionKeys::new(SECRET, 1).expect("secret"));
        Self {
            router: app(state),
            store,
            keys: SessionKeys::new(SECRET, 1).expect("secret"),
        }
    }

    /// Create an account through the regular provisioning path and return it with a token
    pub async fn user(&self, email: &str, role: Role) -> (User, String) {
        let input = json!({ "email": email, "password": "password123" });
        let user = users::provision(self.store.as_ref(), input.as_object().unwrap(), role)
            .await
            .expect("provision user")
            .data;
        let token = self.token_for(&user);
        (user, token)
    }

    /// A correctly signed token for any user, stored or not
    pub fn token_for(&self, user: &User) -> String {
        self.keys.issue(user).expect("issue token")
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.dispatch(request).await
    }

    pub async fn dispatch(&self, request: Request<Body>) -> Reply {
        let response = self.router.clone().oneshot(request).await.expect("infallible router");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Reply { status, headers, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Reply {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Reply {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> Reply {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Reply {
        self.send(Method::DELETE, uri, token, None).await
    }
}

pub fn exam_body(user_id: &str) -> Value {
    json!({
        "title": "Midterm",
        "q1": "Ali",
        "q2": "A long enough answer",
        "q3": "Another long answer",
        "q4": "loops",
        "q5": "fine!",
        "answer": "yes",
        "answerOne": "Muhammad",
        "status": "todo",
        "type": "test",
        "userId": user_id
    })
}

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// The real binary, started once per test process on a free port with an in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_studydesk"));
        cmd.env("PORT", port.to_string())
            .env("APP_ENV", "development")
            .env("DATABASE_URL", "")
            .env("JWT_SECRET", SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
