use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use entity::user::{self, Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{hash_password, CurrentUser},
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_to: Option<String>,
    pub join_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserDto {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            department: model.department,
            employee_id: model.employee_id,
            phone: model.phone,
            location: model.location,
            reporting_to: model.reporting_to,
            join_date: model.join_date.with_timezone(&Utc),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub department: String,
    pub employee_id: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reporting_to: Option<String>,
    #[serde(default)]
    pub join_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub employee_id: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reporting_to: Option<String>,
}

pub async fn list_employees(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> ApiResult<Json<Vec<UserDto>>> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::CreatedAt)
        .all(state.db.as_ref())
        .await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    current.require_admin()?;

    let name = required(&payload.name, "Name is required")?;
    let email = normalize_email(&payload.email)?;
    let department = required(&payload.department, "Department is required")?;
    let employee_id = required(&payload.employee_id, "Employee ID is required")?;
    let role = Role::parse(payload.role.trim())
        .ok_or_else(|| ApiError::bad_request("Invalid role"))?;
    if payload.password.len() < 8 {
        return Err(ApiError::bad_request(
            "Password must be at least 8 characters",
        ));
    }

    ensure_unique(&state, &email, &employee_id, None).await?;

    let now = Utc::now();
    let model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        password_hash: Set(hash_password(&payload.password).map_err(ApiError::internal)?),
        role: Set(role),
        department: Set(department),
        employee_id: Set(employee_id.clone()),
        phone: Set(opt(payload.phone)),
        location: Set(opt(payload.location)),
        reporting_to: Set(opt(payload.reporting_to)),
        join_date: Set(payload.join_date.unwrap_or(now).into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(state.db.as_ref())
    .await?;

    info!(employee_id = %model.employee_id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "employeeId": model.employee_id })),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserDto>> {
    current.require_admin()?;

    let existing = user::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let name = required(&payload.name, "Name is required")?;
    let email = normalize_email(&payload.email)?;
    let department = required(&payload.department, "Department is required")?;
    let employee_id = required(&payload.employee_id, "Employee ID is required")?;
    let role = Role::parse(payload.role.trim())
        .ok_or_else(|| ApiError::bad_request("Invalid role"))?;

    ensure_unique(&state, &email, &employee_id, Some(existing.id)).await?;

    let mut active: user::ActiveModel = existing.into();
    active.name = Set(name);
    active.email = Set(email);
    active.role = Set(role);
    active.department = Set(department);
    active.employee_id = Set(employee_id);
    active.phone = Set(opt(payload.phone));
    active.location = Set(opt(payload.location));
    active.reporting_to = Set(opt(payload.reporting_to));
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(state.db.as_ref()).await?;

    Ok(Json(UserDto::from(updated)))
}

async fn ensure_unique(
    state: &AppState,
    email: &str,
    employee_id: &str,
    exclude: Option<Uuid>,
) -> Result<(), ApiError> {
    let mut email_query = user::Entity::find().filter(user::Column::Email.eq(email));
    let mut employee_query =
        user::Entity::find().filter(user::Column::EmployeeId.eq(employee_id));
    if let Some(id) = exclude {
        email_query = email_query.filter(user::Column::Id.ne(id));
        employee_query = employee_query.filter(user::Column::Id.ne(id));
    }
    if email_query.one(state.db.as_ref()).await?.is_some() {
        return Err(ApiError::conflict("A user with this email already exists"));
    }
    if employee_query.one(state.db.as_ref()).await?.is_some() {
        return Err(ApiError::conflict(
            "A user with this employee ID already exists",
        ));
    }
    Ok(())
}

fn required(value: &str, message: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::bad_request(message))
    } else {
        Ok(trimmed.to_string())
    }
}

fn normalize_email(value: &str) -> Result<String, ApiError> {
    let email = value.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request("A valid email is required"));
    }
    Ok(email)
}

fn opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
