use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Reviewed employee's business key, not a UUID reference.
    #[sea_orm(indexed)]
    pub employee_id: String,
    pub employee_name: String,
    pub employee_role: Option<String>,
    pub review_type: String,
    pub period: String,
    pub status: Status,
    /// Overall score on a 1-5 scale; fractional values allowed.
    pub score: Option<f64>,
    pub reviewer: Option<String>,
    pub reviewer_id: Option<String>,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub completed_date: Option<DateTimeWithTimeZone>,
    /// Per-category numeric sub-scores keyed by criteria id.
    pub ratings: Json,
    pub goals: Option<String>,
    pub achievements: Option<String>,
    pub improvements: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl ActiveModelBehavior for ActiveModel {}
