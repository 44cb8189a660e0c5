#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use flights_api::{app, config::AppConfig, config::JwtConfig, database::Storage, AppState};

pub const JWT_KEY: &str = "integration-test-signing-key-0123456789abcdef";
pub const JWT_ISSUER: &str = "flights-api-tests";
pub const JWT_AUDIENCE: &str = "flights-api-clients";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

/// Start the real router on a free port with fresh in-memory storage.
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(&[]).await
}

/// Same as [`spawn_server`], with extra environment-style settings.
pub async fn spawn_server_with(overrides: &[(&str, &str)]) -> Result<TestServer> {
    let mut settings: Vec<(String, String)> = vec![
        ("JWT_KEY".to_string(), JWT_KEY.to_string()),
        ("JWT_ISSUER".to_string(), JWT_ISSUER.to_string()),
        ("JWT_AUDIENCE".to_string(), JWT_AUDIENCE.to_string()),
    ];
    settings.extend(overrides.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    let config = AppConfig::from_lookup(|key| {
        settings
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })?;

    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let router = app(AppState::new(config, Storage::memory()));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        client: Client::new(),
    })
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        key: JWT_KEY.to_string(),
        issuer: Some(JWT_ISSUER.to_string()),
        audience: Some(JWT_AUDIENCE.to_string()),
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub async fn register(&self, username: &str, password: &str, role: &str) -> Result<StatusCode> {
        let res = self
            .post("/users/register")
            .json(&json!({ "username": username, "password": password, "role": role }))
            .send()
            .await?;
        Ok(res.status())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let res = self
            .post("/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    /// Register `username` with `role` and return a fresh token.
    pub async fn token_for(&self, username: &str, role: &str) -> Result<String> {
        let status = self.register(username, "p@ssw0rd", role).await?;
        anyhow::ensure!(status == StatusCode::OK, "registration failed: {}", status);
        self.login(username, "p@ssw0rd").await
    }
}

/// A valid flight body departing `days_ahead` days from now.
pub fn flight_body(origin: &str, destination: &str, days_ahead: i64) -> Value {
    let departure = chrono::Utc::now() + chrono::Duration::days(days_ahead);
    let arrival = departure + chrono::Duration::hours(2);
    json!({
        "origin": origin,
        "destination": destination,
        "departure": departure.to_rfc3339(),
        "arrival": arrival.to_rfc3339(),
        "status": "InTime",
    })
}
