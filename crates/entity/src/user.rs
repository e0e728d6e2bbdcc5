use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: String,
    /// Business key shown across the app, e.g. `EMP002`.
    #[sea_orm(unique)]
    pub employee_id: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// `employee_id` of the supervisor this user reports to. Not FK-enforced.
    pub reporting_to: Option<String>,
    pub join_date: DateTimeWithTimeZone,
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
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "hod")]
    Hod,
    #[sea_orm(string_value = "employee")]
    Employee,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hod => "hod",
            Role::Employee => "employee",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "hod" => Some(Role::Hod),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }

    /// Admin and HOD count as supervisory roles.
    pub fn is_supervisor(self) -> bool {
        matches!(self, Role::Admin | Role::Hod)
    }
}

impl ActiveModelBehavior for ActiveModel {}
