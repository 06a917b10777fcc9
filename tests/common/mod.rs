#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use contacts_api::auth::{PasswordHasher, TokenIssuer};
use contacts_api::config::ApiConfig;
use contacts_api::database::models::{Contact, ContactPatch, NewContact, User};
use contacts_api::database::{
    ContactRepository, DatabaseError, HealthCheck, MemoryStore, Repositories, UserRepository,
};
use contacts_api::AppState;

pub const TEST_SECRET: &[u8] = b"contacts-api-test-secret";

pub fn test_tokens() -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(TEST_SECRET, chrono::Duration::minutes(15)))
}

/// Router over the given repositories, with cheap argon2 parameters
pub fn app_with(repositories: Repositories) -> Router {
    let hasher = PasswordHasher::with_cost(1024, 1, 1).expect("valid argon2 parameters");
    let state = AppState::new(repositories, test_tokens(), hasher);
    let api = ApiConfig {
        enable_cors: false,
        max_request_size_bytes: 1024 * 1024,
    };
    contacts_api::router(state, &api)
}

/// Router over a fresh in-memory store; the store is returned for inspection
pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(Repositories::from_store(store.clone()));
    (app, store)
}

/// Send one request through the router and decode the JSON reply.
/// An empty body decodes as `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    send_request(app, request).await
}

/// Send a prepared request, for cases the JSON helper cannot express
pub async fn send_request(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("response body is not JSON")?
    };
    Ok((status, body))
}

/// Register `username` and return a fresh access token for it
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> Result<String> {
    let credentials = serde_json::json!({ "username": username, "password": password });

    let (status, _) = send(app, Method::POST, "/register", Some(credentials.clone()), None).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "register failed with {}", status);

    let (status, body) = send(app, Method::POST, "/login", Some(credentials), None).await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed with {}", status);

    body["access_token"]
        .as_str()
        .map(str::to_string)
        .context("login reply has no access_token")
}

/// Store whose every call fails as if the database were unreachable
pub struct UnreachableStore;

fn unreachable() -> DatabaseError {
    DatabaseError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl ContactRepository for UnreachableStore {
    async fn list(&self) -> Result<Vec<Contact>, DatabaseError> {
        Err(unreachable())
    }

    async fn find(&self, _id: i32) -> Result<Option<Contact>, DatabaseError> {
        Err(unreachable())
    }

    async fn create(&self, _contact: NewContact) -> Result<Contact, DatabaseError> {
        Err(unreachable())
    }

    async fn update(&self, _id: i32, _patch: ContactPatch) -> Result<Option<Contact>, DatabaseError> {
        Err(unreachable())
    }

    async fn delete(&self, _id: i32) -> Result<bool, DatabaseError> {
        Err(unreachable())
    }
}

#[async_trait]
impl UserRepository for UnreachableStore {
    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, DatabaseError> {
        Err(unreachable())
    }

    async fn create(&self, _username: &str, _password_hash: &str) -> Result<User, DatabaseError> {
        Err(unreachable())
    }
}

#[async_trait]
impl HealthCheck for UnreachableStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(unreachable())
    }
}

/// The real binary on the in-memory store; killed when dropped
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_contacts-api"));
        cmd.arg("--memory")
            .env("APP_ENV", "development")
            .env("HOST", "127.0.0.1")
            .env("CONTACTS_API_PORT", port.to_string())
            .env("JWT_SECRET_KEY", "contacts-api-server-test-secret")
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

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Start a private server for one test and wait until it answers /health
pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
