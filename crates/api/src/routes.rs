use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use entity::user;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::{Duration as TimeDuration, OffsetDateTime};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    analytics, criteria, goals, report, reviews, users,
    auth::{authenticate, issue_token, verify_password, SESSION_COOKIE},
    error::{ApiError, ApiResult},
    state::AppState,
    users::UserDto,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/login", get(login_page))
        .route("/healthz", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/employees", get(users::list_employees))
        .route("/api/reviews", get(reviews::list_reviews))
        .route("/api/goals", get(goals::list_goals))
        .route(
            "/api/review-questions",
            get(criteria::list_criteria).put(criteria::save_criteria),
        )
        .route("/api/users/create", post(users::create_user))
        .route("/api/users/{id}/update", put(users::update_user))
        .route("/api/analytics", get(analytics::get_analytics))
        .route("/api/analytics/export", get(report::export_analytics))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Authenticated users get an API summary; everyone else lands on /login.
async fn root(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match authenticate(&state, &headers).await {
        Some(current) => Json(json!({
            "message": "PMS API",
            "user": {
                "name": current.name,
                "role": current.role.as_str(),
                "employeeId": current.employee_id,
            },
        }))
        .into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>PMS Login</title></head>\
         <body><h1>Performance Management System</h1>\
         <p>Sign in via POST /api/auth/login.</p></body></html>",
    )
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = state.db.ping().await.is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    ok: bool,
    user: UserDto,
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let email = payload.email.trim().to_lowercase();
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(state.db.as_ref())
        .await?;
    // Unknown email and bad password are indistinguishable on purpose.
    let Some(user) = user else {
        return Err(ApiError::unauthorized("Invalid credentials"));
    };
    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = issue_token(user.id, user.role, &state.auth)
        .map_err(|err| ApiError::internal(err.into()))?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(state.auth.session_ttl_minutes))
        .build();

    info!(email = %user.email, "login succeeded");
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            ok: true,
            user: UserDto::from(user),
        }),
    ))
}

/// Always sends the expired cookie, whether or not the request carried one.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let expired = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build();
    (jar.add(expired), StatusCode::NO_CONTENT)
}
