use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[sea_orm(indexed)]
    pub employee_id: String,
    pub employee_name: String,
    pub employee_role: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub status: Status,
    /// Completion percentage, 0-100.
    pub progress: i32,
    pub start_date: Option<DateTimeWithTimeZone>,
    pub due_date: Option<DateTimeWithTimeZone>,
    /// `employee_id` of the supervisor who assigned the goal.
    pub created_by: Option<String>,
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
pub enum Priority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl ActiveModelBehavior for ActiveModel {}
