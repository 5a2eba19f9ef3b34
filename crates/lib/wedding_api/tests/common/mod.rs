//! Shared fixtures for the router integration tests: in-memory repositories
//! and request helpers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;
use wedding_api::AppState;
use wedding_api::config::ApiConfig;
use wedding_core::auth::TokenService;
use wedding_core::auth::queries::UserRepository;
use wedding_core::models::user::{NewUser, User};
use wedding_core::models::wedding::{NewWedding, Wedding};
use wedding_core::store::StoreError;
use wedding_core::weddings::WeddingRepository;

pub const SECRET: &[u8] = b"integration-test-secret";
pub const PASSWORD: &str = "Password1!";

struct Row<T> {
    value: T,
    deleted: bool,
}

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<Row<User>>>,
    next_id: AtomicI64,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| !r.deleted && r.value.email == email)
            .map(|r| r.value.clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| !r.deleted && r.value.id == id)
            .map(|r| r.value.clone()))
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        // The unique index covers soft-deleted rows too.
        if rows.iter().any(|r| r.value.email == user.email) {
            return Err(StoreError::Duplicate);
        }
        let now = Utc::now();
        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            partner_name: user.partner_name,
            created_at: now,
            updated_at: now,
        };
        rows.push(Row {
            value: created.clone(),
            deleted: false,
        });
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == user.id)
            .ok_or(StoreError::NotFound)?;
        row.value.name = user.name.clone();
        row.value.partner_name = user.partner_name.clone();
        row.value.updated_at = Utc::now();
        Ok(row.value.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| !r.deleted && r.value.id == id) {
            Some(row) => {
                row.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryWeddings {
    rows: Mutex<Vec<Row<Wedding>>>,
    next_id: AtomicI64,
}

impl MemoryWeddings {
    /// Number of stored rows, deleted ones included.
    pub fn stored(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl WeddingRepository for MemoryWeddings {
    async fn create(&self, owner_id: i64, wedding: NewWedding) -> Result<Wedding, StoreError> {
        let now = Utc::now();
        let created = Wedding {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: owner_id,
            venue_name: wedding.venue_name,
            venue_address: wedding.venue_address,
            event_date: wedding.event_date,
            event_time: wedding.event_time,
            max_guests: wedding.max_guests,
            current_guest_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(Row {
            value: created.clone(),
            deleted: false,
        });
        Ok(created)
    }

    async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Wedding>, StoreError> {
        let rows = self.rows.lock().unwrap();
        let mut owned: Vec<Wedding> = rows
            .iter()
            .filter(|r| !r.deleted && r.value.user_id == owner_id)
            .map(|r| r.value.clone())
            .collect();
        owned.sort_by_key(|w| w.event_date);
        Ok(owned)
    }

    async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<Wedding>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| !r.deleted && r.value.id == id && r.value.user_id == owner_id)
            .map(|r| r.value.clone()))
    }

    async fn update(&self, wedding: &Wedding) -> Result<Wedding, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == wedding.id)
            .ok_or(StoreError::NotFound)?;
        row.value = Wedding {
            updated_at: Utc::now(),
            ..wedding.clone()
        };
        Ok(row.value.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| !r.deleted && r.value.id == id) {
            Some(row) => {
                row.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<TokenService>,
    pub users: Arc<MemoryUsers>,
    pub weddings: Arc<MemoryWeddings>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_env("test")
    }

    pub fn with_env(env: &str) -> Self {
        let tokens = Arc::new(TokenService::new(SECRET).unwrap());
        let users = Arc::new(MemoryUsers::default());
        let weddings = Arc::new(MemoryWeddings::default());
        let config = ApiConfig::new(
            "127.0.0.1:0",
            "postgres://localhost/unused",
            String::from_utf8_lossy(SECRET),
            env,
            1,
            Duration::from_secs(30),
        )
        .unwrap();

        let state = AppState {
            users: users.clone(),
            weddings: weddings.clone(),
            tokens: Arc::clone(&tokens),
            config,
        };

        Self {
            router: wedding_api::router(state),
            tokens,
            users,
            weddings,
        }
    }

    /// Send a request and return the status with the parsed JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.expect("request");
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse JSON")
        };
        (status, json)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send(request(method, uri, token, body)).await
    }

    /// Register a user and return its token and ID.
    pub async fn register(&self, email: &str) -> (String, i64) {
        let (status, json) = self
            .call(
                Method::POST,
                "/api/v1/user/register",
                None,
                Some(json!({
                    "name": "Ana",
                    "email": email,
                    "password": PASSWORD,
                    "partner_name": "Bruno",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {json}");
        let token = json["token"].as_str().expect("token").to_string();
        let id = json["user"]["id"].as_i64().expect("user id");
        (token, id)
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}
