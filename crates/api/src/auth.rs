use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use chrono::{Duration, Utc};
use entity::user::{self, Role};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

pub const SESSION_COOKIE: &str = "pms_session";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("AUTH_SECRET").unwrap_or_else(|_| "dev-secret".into());
        let session_ttl_minutes = std::env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(480);
        Self {
            jwt_secret,
            session_ttl_minutes,
        }
    }

    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.jwt_secret.as_bytes())
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.jwt_secret.as_bytes())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Authenticated user resolved from the session token. The user row is
/// re-loaded per request so role changes take effect immediately.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub employee_id: String,
    pub department: String,
}

impl CurrentUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::forbidden("Admin access required"))
        }
    }

    pub fn require_supervisor(&self) -> Result<(), ApiError> {
        if self.role.is_supervisor() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Supervisor access required"))
        }
    }
}

pub fn issue_token(
    user_id: Uuid,
    role: Role,
    config: &AuthConfig,
) -> jsonwebtoken::errors::Result<String> {
    let now = Utc::now();
    let exp = now
        .checked_add_signed(Duration::minutes(config.session_ttl_minutes))
        .unwrap_or(now)
        .timestamp() as usize;
    let claims = SessionClaims {
        sub: user_id,
        role: role.as_str().to_string(),
        exp,
        iat: now.timestamp() as usize,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &config.encoding_key())
}

pub fn decode_token(
    token: &str,
    config: &AuthConfig,
) -> jsonwebtoken::errors::Result<SessionClaims> {
    jsonwebtoken::decode::<SessionClaims>(token, &config.decoding_key(), &Validation::default())
        .map(|data| data.claims)
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow::anyhow!("hash error: {err}"))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Pulls the session token from `Authorization: Bearer` or the session cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(text) = value.to_str() {
            if let Some(rest) = text.strip_prefix("Bearer ") {
                return Some(rest.trim().to_string());
            }
        }
    }
    if let Some(cookie) = headers.get(header::COOKIE) {
        if let Ok(text) = cookie.to_str() {
            for part in text.split(';') {
                let trimmed = part.trim();
                if let Some(rest) = trimmed.strip_prefix(SESSION_COOKIE) {
                    if let Some(value) = rest.strip_prefix('=') {
                        return Some(value.trim().to_string());
                    }
                }
            }
        }
    }
    None
}

pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let token = extract_token(headers)?;
    let claims = decode_token(&token, &state.auth).ok()?;
    load_current_user(state.db.as_ref(), claims.sub).await
}

async fn load_current_user(db: &DatabaseConnection, user_id: Uuid) -> Option<CurrentUser> {
    let user = user::Entity::find_by_id(user_id).one(db).await.ok()??;
    Some(CurrentUser {
        id: user.id,
        name: user.name,
        role: user.role,
        employee_id: user.employee_id,
        department: user.department,
    })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers)
            .await
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
