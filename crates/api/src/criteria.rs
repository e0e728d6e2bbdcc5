use axum::{extract::State, Json};
use chrono::Utc;
use entity::review_criteria;
use sea_orm::{
    ActiveModelTrait, DbErr, EntityTrait, QueryOrder, Set, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Built-in question set served until an admin configures their own.
const DEFAULT_CRITERIA: [(&str, &str, &str); 8] = [
    (
        "technical",
        "Technical Skills",
        "Proficiency in role-specific technical competencies",
    ),
    (
        "communication",
        "Communication",
        "Clarity and effectiveness in written and verbal communication",
    ),
    (
        "teamwork",
        "Teamwork",
        "Collaboration and contribution to team outcomes",
    ),
    (
        "leadership",
        "Leadership",
        "Ability to guide, mentor and take ownership",
    ),
    (
        "problem_solving",
        "Problem Solving",
        "Analytical thinking and quality of solutions",
    ),
    (
        "adaptability",
        "Adaptability",
        "Response to changing priorities and requirements",
    ),
    (
        "quality",
        "Quality of Work",
        "Accuracy, thoroughness and attention to detail",
    ),
    (
        "productivity",
        "Productivity",
        "Output and efficiency against expectations",
    ),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionDto {
    pub id: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveCriteriaRequest {
    pub criteria: Vec<CriterionDto>,
}

pub(crate) fn defaults() -> Vec<CriterionDto> {
    DEFAULT_CRITERIA
        .iter()
        .map(|(id, label, description)| CriterionDto {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        })
        .collect()
}

pub async fn list_criteria(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> ApiResult<Json<Vec<CriterionDto>>> {
    let stored = review_criteria::Entity::find()
        .order_by_asc(review_criteria::Column::Position)
        .all(state.db.as_ref())
        .await?;
    if stored.is_empty() {
        return Ok(Json(defaults()));
    }
    Ok(Json(
        stored
            .into_iter()
            .map(|row| CriterionDto {
                id: row.key,
                label: row.label,
                description: row.description,
            })
            .collect(),
    ))
}

/// Replaces the configured question set wholesale, preserving payload order.
pub async fn save_criteria(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<SaveCriteriaRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    current.require_admin()?;

    if payload.criteria.is_empty() {
        return Err(ApiError::bad_request("At least one question is required"));
    }
    for criterion in &payload.criteria {
        if criterion.label.trim().is_empty() {
            return Err(ApiError::bad_request("Question title is required"));
        }
    }
    let mut seen: Vec<&str> = Vec::new();
    for criterion in &payload.criteria {
        if seen.contains(&criterion.id.as_str()) {
            return Err(ApiError::bad_request("Duplicate question id"));
        }
        seen.push(criterion.id.as_str());
    }

    let criteria = payload.criteria;
    let count = criteria.len();
    let now = Utc::now();
    // delete + re-insert atomically so a failed write keeps the old set
    state
        .db
        .transaction::<_, (), DbErr>(move |txn| {
            Box::pin(async move {
                review_criteria::Entity::delete_many().exec(txn).await?;
                for (position, criterion) in criteria.iter().enumerate() {
                    review_criteria::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        key: Set(criterion.id.trim().to_string()),
                        label: Set(criterion.label.trim().to_string()),
                        description: Set(criterion.description.trim().to_string()),
                        position: Set(position as i32),
                        created_at: Set(now.into()),
                        updated_at: Set(now.into()),
                    }
                    .insert(txn)
                    .await?;
                }
                Ok(())
            })
        })
        .await
        .map_err(|err| match err {
            TransactionError::Connection(e) | TransactionError::Transaction(e) => {
                ApiError::from(e)
            }
        })?;

    info!(count, "review criteria replaced");
    Ok(Json(json!({ "ok": true })))
}
