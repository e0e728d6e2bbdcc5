use anyhow::bail;
use chrono::{TimeZone, Utc};
use entity::{goal, review, review_criteria, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{auth::hash_password, criteria};

pub const DEMO_ADMIN_PASSWORD: &str = "AdminPMS@123";
pub const DEMO_HOD_PASSWORD: &str = "HodPMS@123";
pub const DEMO_EMPLOYEE_PASSWORD: &str = "EmpPMS@123";

pub struct SeededPmsRecords {
    pub users: Vec<user::Model>,
    pub reviews: Vec<review::Model>,
    pub goals: Vec<goal::Model>,
    pub criteria: Vec<review_criteria::Model>,
}

impl SeededPmsRecords {
    pub fn user_email(&self, email: &str) -> Option<&user::Model> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn user_employee_id(&self, employee_id: &str) -> Option<&user::Model> {
        self.users.iter().find(|u| u.employee_id == employee_id)
    }
}

/// Loads the demo dataset: five users across four departments, one completed
/// review and two in-progress goals for EMP002, plus the default review
/// criteria. Refuses to touch a database that already has users.
pub async fn seed_demo(db: &DatabaseConnection) -> anyhow::Result<SeededPmsRecords> {
    let existing = user::Entity::find().count(db).await?;
    if existing > 0 {
        bail!("refusing to seed: database already contains {existing} users");
    }

    let now = Utc::now();
    let admin_hash = hash_password(DEMO_ADMIN_PASSWORD)?;
    let hod_hash = hash_password(DEMO_HOD_PASSWORD)?;
    let employee_hash = hash_password(DEMO_EMPLOYEE_PASSWORD)?;

    let user_rows: [(&str, &str, &str, user::Role, &str, &str, &str, &str, (i32, u32, u32)); 5] = [
        (
            "System Administrator",
            "admin@company.com",
            admin_hash.as_str(),
            user::Role::Admin,
            "IT",
            "EMP001",
            "+1 (555) 000-0001",
            "New York, NY",
            (2020, 1, 1),
        ),
        (
            "John Smith",
            "hod@company.com",
            hod_hash.as_str(),
            user::Role::Hod,
            "Engineering",
            "HOD001",
            "+1 (555) 000-0002",
            "San Francisco, CA",
            (2019, 3, 15),
        ),
        (
            "Sarah Johnson",
            "employee@company.com",
            employee_hash.as_str(),
            user::Role::Employee,
            "Engineering",
            "EMP002",
            "+1 (555) 123-4567",
            "New York, NY",
            (2022, 3, 15),
        ),
        (
            "Michael Chen",
            "michael.chen@company.com",
            employee_hash.as_str(),
            user::Role::Employee,
            "Product",
            "EMP003",
            "+1 (555) 234-5678",
            "San Francisco, CA",
            (2021, 8, 22),
        ),
        (
            "Emily Davis",
            "emily.davis@company.com",
            employee_hash.as_str(),
            user::Role::Employee,
            "Design",
            "EMP004",
            "+1 (555) 345-6789",
            "Austin, TX",
            (2023, 1, 10),
        ),
    ];

    let mut users = Vec::with_capacity(user_rows.len());
    for (name, email, hash, role, department, employee_id, phone, location, (y, m, d)) in user_rows
    {
        let join_date = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(hash.to_string()),
            role: Set(role),
            department: Set(department.to_string()),
            employee_id: Set(employee_id.to_string()),
            phone: Set(Some(phone.to_string())),
            location: Set(Some(location.to_string())),
            reporting_to: Set(None),
            join_date: Set(join_date.into()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await?;
        users.push(model);
    }

    let review = review::ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_id: Set("EMP002".to_string()),
        employee_name: Set("Sarah Johnson".to_string()),
        employee_role: Set(Some("Software Engineer".to_string())),
        review_type: Set("Quarterly".to_string()),
        period: Set("Q4 2025".to_string()),
        status: Set(review::Status::Completed),
        score: Set(Some(4.5)),
        reviewer: Set(Some("John Smith".to_string())),
        reviewer_id: Set(Some("HOD001".to_string())),
        due_date: Set(Some(
            Utc.with_ymd_and_hms(2024, 12, 15, 0, 0, 0).unwrap().into(),
        )),
        completed_date: Set(Some(
            Utc.with_ymd_and_hms(2024, 12, 10, 0, 0, 0).unwrap().into(),
        )),
        ratings: Set(json!({
            "technical": 5,
            "communication": 4,
            "teamwork": 4,
            "leadership": 4,
            "problem_solving": 5,
            "adaptability": 4,
            "quality": 5,
            "productivity": 4,
        })),
        goals: Set(Some(
            "Complete React certification, Lead junior developer mentoring".to_string(),
        )),
        achievements: Set(Some(
            "Successfully delivered 3 major features, Improved code review process".to_string(),
        )),
        improvements: Set(Some(
            "Enhance public speaking skills, Learn advanced testing frameworks".to_string(),
        )),
        comments: Set(Some(
            "Excellent technical performance with great attention to detail.".to_string(),
        )),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await?;

    let goal_rows = [
        (
            "Complete React Certification",
            "Obtain React Developer Certification to enhance frontend skills",
            "Professional Development",
            goal::Priority::High,
            75,
            (2024, 1, 15),
        ),
        (
            "Lead Junior Developer Mentoring",
            "Mentor 2 junior developers and help with their onboarding",
            "Leadership",
            goal::Priority::Medium,
            60,
            (2024, 2, 1),
        ),
    ];
    let mut goals = Vec::with_capacity(goal_rows.len());
    for (title, description, category, priority, progress, (y, m, d)) in goal_rows {
        let model = goal::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            employee_id: Set("EMP002".to_string()),
            employee_name: Set("Sarah Johnson".to_string()),
            employee_role: Set(Some("Software Engineer".to_string())),
            category: Set(category.to_string()),
            priority: Set(priority),
            status: Set(goal::Status::InProgress),
            progress: Set(progress),
            start_date: Set(Some(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap().into())),
            due_date: Set(Some(
                Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap().into(),
            )),
            created_by: Set(Some("HOD001".to_string())),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await?;
        goals.push(model);
    }

    let mut criteria_rows = Vec::new();
    for (position, criterion) in criteria::defaults().iter().enumerate() {
        let model = review_criteria::ActiveModel {
            id: Set(Uuid::new_v4()),
            key: Set(criterion.id.clone()),
            label: Set(criterion.label.clone()),
            description: Set(criterion.description.clone()),
            position: Set(position as i32),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await?;
        criteria_rows.push(model);
    }

    info!("demo data seeded");
    info!("admin: admin@company.com / {DEMO_ADMIN_PASSWORD}");
    info!("hod: hod@company.com / {DEMO_HOD_PASSWORD}");
    info!("employee: employee@company.com / {DEMO_EMPLOYEE_PASSWORD}");

    Ok(SeededPmsRecords {
        users,
        reviews: vec![review],
        goals,
        criteria: criteria_rows,
    })
}
