#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use contacts_api::{app::build_app, config::AppConfig, state::AppState};
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "rahasia";

pub struct TestApp {
    pub router: Router,
    pub db: PgPool,
}

/// App over the database in `DATABASE_URL`, migrated. Callers are `#[ignore]`d and
/// run with `cargo test -- --ignored` against PostgreSQL.
pub async fn spawn() -> TestApp {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");
    let db = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("run migrations");

    let config = AppConfig::from_lookup(|key: &str| (key == "DATABASE_URL").then(|| url.clone()))
        .expect("test config");
    let state = AppState::from_parts(db.clone(), Arc::new(config));
    TestApp {
        router: build_app(state),
        db,
    }
}

pub fn unique_username() -> String {
    format!("u{}", Uuid::new_v4().simple())
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header("X-API-TOKEN", token);
        }
        let req = match body {
            Some(b) => req
                .header("content-type", "application/json")
                .body(Body::from(b.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn register(&self, username: &str) {
        let (status, body) = self
            .send(
                "POST",
                "/api/users",
                None,
                Some(json!({"username": username, "password": PASSWORD, "name": "test"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/api/users/login",
            None,
            Some(json!({"username": username, "password": password})),
        )
        .await
    }

    /// Registers a fresh user and returns `(username, token)`.
    pub async fn user_with_token(&self) -> (String, String) {
        let username = unique_username();
        self.register(&username).await;
        let (status, body) = self.login(&username, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (username, token)
    }

    pub async fn create_contact(&self, token: &str, body: Value) -> i64 {
        let (status, res) = self.send("POST", "/api/contacts", Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create contact failed: {res}");
        res["data"]["id"].as_i64().unwrap()
    }

    pub async fn create_address(&self, token: &str, contact_id: i64) -> i64 {
        let (status, res) = self
            .send(
                "POST",
                &format!("/api/contacts/{contact_id}/addresses"),
                Some(token),
                Some(json!({
                    "street": "test",
                    "city": "test",
                    "province": "test",
                    "country": "test",
                    "postal_code": "test"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create address failed: {res}");
        res["data"]["id"].as_i64().unwrap()
    }

    pub async fn cleanup(&self, username: &str) {
        sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.db)
            .await
            .expect("cleanup user");
    }
}
