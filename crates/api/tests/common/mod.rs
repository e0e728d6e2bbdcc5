use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use entity::{goal, review, user};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use pms_api::{
    auth::{issue_token, AuthConfig},
    routes::build_router,
    seed::{seed_demo, SeededPmsRecords},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestContext {
    pub db: Arc<DatabaseConnection>,
    pub auth: Arc<AuthConfig>,
    pub router: Router,
}

impl TestContext {
    pub async fn new() -> Self {
        let conn = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&conn, None).await.unwrap();
        let db = Arc::new(conn);
        let auth = Arc::new(AuthConfig {
            jwt_secret: "test-secret".into(),
            session_ttl_minutes: 15,
        });
        let router = build_router(AppState::new(db.clone(), auth.clone()));
        Self { db, auth, router }
    }

    pub async fn new_seeded() -> (Self, SeededPmsRecords) {
        let ctx = Self::new().await;
        let seeded = seed_demo(ctx.db.as_ref()).await.unwrap();
        (ctx, seeded)
    }

    pub fn token_for(&self, user: &user::Model) -> String {
        issue_token(user.id, user.role, &self.auth).unwrap()
    }

    pub async fn insert_user(
        &self,
        name: &str,
        employee_id: &str,
        department: &str,
        role: user::Role,
    ) -> user::Model {
        let now = Utc::now();
        user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(format!("{}@company.com", employee_id.to_lowercase())),
            password_hash: Set("x".to_string()),
            role: Set(role),
            department: Set(department.to_string()),
            employee_id: Set(employee_id.to_string()),
            phone: Set(None),
            location: Set(None),
            reporting_to: Set(None),
            join_date: Set(now.into()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn insert_review(
        &self,
        employee_id: &str,
        employee_name: &str,
        status: review::Status,
        score: Option<f64>,
    ) -> review::Model {
        let now = Utc::now();
        review::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id.to_string()),
            employee_name: Set(employee_name.to_string()),
            employee_role: Set(None),
            review_type: Set("Quarterly".to_string()),
            period: Set("Q4 2025".to_string()),
            status: Set(status),
            score: Set(score),
            reviewer: Set(None),
            reviewer_id: Set(None),
            due_date: Set(None),
            completed_date: Set(None),
            ratings: Set(json!({})),
            goals: Set(None),
            achievements: Set(None),
            improvements: Set(None),
            comments: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn insert_goal(
        &self,
        employee_id: &str,
        title: &str,
        status: goal::Status,
    ) -> goal::Model {
        let now = Utc::now();
        goal::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(String::new()),
            employee_id: Set(employee_id.to_string()),
            employee_name: Set(String::new()),
            employee_role: Set(None),
            category: Set("Professional Development".to_string()),
            priority: Set(goal::Priority::Medium),
            status: Set(status),
            progress: Set(50),
            start_date: Set(None),
            due_date: Set(None),
            created_by: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, value)
    }

    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
    ) -> (StatusCode, axum::http::HeaderMap, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
