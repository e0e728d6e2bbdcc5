use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use entity::goal::{self, Priority, Status};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::{auth::CurrentUser, error::ApiResult, state::AppState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub employee_id: String,
    pub employee_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_role: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub status: Status,
    pub progress: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<goal::Model> for GoalDto {
    fn from(model: goal::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            employee_id: model.employee_id,
            employee_name: model.employee_name,
            employee_role: model.employee_role,
            category: model.category,
            priority: model.priority,
            status: model.status,
            progress: model.progress,
            start_date: model.start_date.map(|d| d.with_timezone(&Utc)),
            due_date: model.due_date.map(|d| d.with_timezone(&Utc)),
            created_by: model.created_by,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Admins and HODs see every goal; employees only their own.
pub async fn list_goals(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<GoalDto>>> {
    let mut query = goal::Entity::find().order_by_asc(goal::Column::CreatedAt);
    if !current.role.is_supervisor() {
        query = query.filter(goal::Column::EmployeeId.eq(current.employee_id.clone()));
    }
    let goals = query.all(state.db.as_ref()).await?;
    Ok(Json(goals.into_iter().map(GoalDto::from).collect()))
}
