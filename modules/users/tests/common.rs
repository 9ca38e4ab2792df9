#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use users::contract::model::{NewUser, SortOrder, User};
use users::domain::repo::{RepoError, TxMode, UsersRepository, UsersStore, UsersTransaction};
use users::domain::service::{Service, ServiceConfig};
use users::{UsersConfig, UsersModule};

/// Fresh in-memory SQLite database with migrations applied.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn create_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");
    UsersModule::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn create_test_module() -> (UsersModule, DatabaseConnection) {
    let db = create_test_db().await;
    let module = UsersModule::init(db.clone(), &UsersConfig::default());
    (module, db)
}

pub async fn create_test_service() -> Arc<Service> {
    create_test_module().await.0.service()
}

pub async fn create_test_router() -> Router {
    let (module, _db) = create_test_module().await;
    module.register_rest(Router::new())
}

pub fn new_user(first: &str, last: &str, email: &str) -> NewUser {
    NewUser {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone_number: None,
    }
}

/// Fire one request at the router and decode the JSON envelope.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// What the mock store should do instead of succeeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    /// `create` and `update` report a unique constraint violation.
    DuplicateOnWrite,
    /// Every call fails with a generic database error.
    Database,
}

#[derive(Debug, Clone)]
struct Row {
    user: User,
    active: bool,
}

/// In-memory store for service-level tests; writes are visible immediately.
#[derive(Clone)]
pub struct MockStore {
    rows: Arc<Mutex<Vec<Row>>>,
    fault: Fault,
    pub commits: Arc<Mutex<u32>>,
}

impl MockStore {
    pub fn new(fault: Fault) -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            fault,
            commits: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.rows.lock().unwrap().push(Row { user, active: true });
        self
    }

    pub fn service(&self) -> Service {
        Service::new(Arc::new(self.clone()), ServiceConfig::default())
    }

    pub fn is_active(&self, id: Uuid) -> Option<bool> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.active)
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.fault == Fault::Database {
            return Err(RepoError::Other(anyhow::anyhow!("connection reset by peer")));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), RepoError> {
        self.check()?;
        if self.fault == Fault::DuplicateOnWrite {
            return Err(RepoError::DuplicateKey("ux_users_email_active".into()));
        }
        Ok(())
    }
}

pub fn sample_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        first_name: "Dipesh".into(),
        last_name: "Ghimire".into(),
        email: email.into(),
        phone_number: Some("+9779812345678".into()),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl UsersRepository for MockStore {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        self.check_write()?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            phone_number: new_user.phone_number,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(Row {
            user: user.clone(),
            active: true,
        });
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.active && r.user.id == id)
            .map(|r| r.user.clone()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.active && r.user.email == email))
    }

    async fn find_all(
        &self,
        page: u64,
        size: u64,
        _sort: &[SortOrder],
    ) -> Result<(Vec<User>, u64), RepoError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let active: Vec<User> = rows
            .iter()
            .filter(|r| r.active)
            .map(|r| r.user.clone())
            .collect();
        let total = active.len() as u64;
        let items = active
            .into_iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .collect();
        Ok((items, total))
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        self.check_write()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.active && r.user.id == user.id)
            .ok_or(RepoError::NotFound)?;
        row.user = User {
            updated_at: Utc::now(),
            ..user
        };
        Ok(row.user.clone())
    }

    async fn soft_delete(&self, user: &User) -> Result<(), RepoError> {
        self.check()?;
        if let Some(row) = self
            .rows
            .lock()
            .unwrap()
            .iter_mut()
            .find(|r| r.user.id == user.id)
        {
            row.active = false;
        }
        Ok(())
    }
}

#[async_trait]
impl UsersTransaction for MockStore {
    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        *self.commits.lock().unwrap() += 1;
        Ok(())
    }
}

#[async_trait]
impl UsersStore for MockStore {
    async fn begin(&self, _mode: TxMode) -> Result<Box<dyn UsersTransaction>, RepoError> {
        self.check()?;
        Ok(Box::new(self.clone()))
    }
}
