use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use entity::review::{self, Status};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::{auth::CurrentUser, error::ApiResult, state::AppState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: Uuid,
    pub employee_id: String,
    pub employee_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_role: Option<String>,
    pub review_type: String,
    pub period: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    pub ratings: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<review::Model> for ReviewDto {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            employee_name: model.employee_name,
            employee_role: model.employee_role,
            review_type: model.review_type,
            period: model.period,
            status: model.status,
            score: model.score,
            reviewer: model.reviewer,
            reviewer_id: model.reviewer_id,
            due_date: model.due_date.map(|d| d.with_timezone(&Utc)),
            completed_date: model.completed_date.map(|d| d.with_timezone(&Utc)),
            ratings: model.ratings,
            goals: model.goals,
            achievements: model.achievements,
            improvements: model.improvements,
            comments: model.comments,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Admins and HODs see every review; employees only their own.
pub async fn list_reviews(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<ReviewDto>>> {
    let mut query = review::Entity::find().order_by_asc(review::Column::CreatedAt);
    if !current.role.is_supervisor() {
        query = query.filter(review::Column::EmployeeId.eq(current.employee_id.clone()));
    }
    let reviews = query.all(state.db.as_ref()).await?;
    Ok(Json(reviews.into_iter().map(ReviewDto::from).collect()))
}
