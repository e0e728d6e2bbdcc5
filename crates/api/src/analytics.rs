use std::cmp::Ordering;

use axum::{extract::State, Json};
use entity::{goal, review, user};
use sea_orm::EntityTrait;
use serde::Serialize;
use tracing::warn;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    state::AppState,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub avg_performance: f64,
    pub reviews_completed: f64,
    pub goal_achievement: f64,
    pub employee_satisfaction: f64,
    pub department_performance: Vec<DepartmentPerformance>,
    pub top_performers: Vec<TopPerformer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPerformance {
    pub department: String,
    pub avg_score: f64,
    pub employees: usize,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Stable,
    Down,
}

impl Trend {
    /// Thresholds apply to the unrounded department average.
    fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            Trend::Up
        } else if score >= 3.5 {
            Trend::Stable
        } else {
            Trend::Down
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Stable => "stable",
            Trend::Down => "down",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub name: String,
    pub role: String,
    pub score: f64,
    pub department: String,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn is_scored_completed(review: &review::Model) -> bool {
    review.status == review::Status::Completed && review.score.map_or(false, |s| s > 0.0)
}

/// Aggregates the three collections in a single pass. Satisfaction is a
/// derived heuristic (80% of the average score), not a measured quantity.
pub fn compute_report(
    employees: &[user::Model],
    reviews: &[review::Model],
    goals: &[goal::Model],
) -> AnalyticsReport {
    let completed: Vec<&review::Model> = reviews.iter().filter(|r| is_scored_completed(r)).collect();

    let avg_score = if completed.is_empty() {
        0.0
    } else {
        completed.iter().filter_map(|r| r.score).sum::<f64>() / completed.len() as f64
    };

    let total_employees = employees
        .iter()
        .filter(|e| e.role == user::Role::Employee)
        .count();
    let reviews_completed = if total_employees > 0 {
        (completed.len() as f64 / total_employees as f64 * 100.0).round()
    } else {
        0.0
    };

    let completed_goals = goals
        .iter()
        .filter(|g| g.status == goal::Status::Completed)
        .count();
    let goal_achievement = if goals.is_empty() {
        0.0
    } else {
        (completed_goals as f64 / goals.len() as f64 * 100.0).round()
    };

    // Departments in first-seen order over all users, supervisors included.
    let mut departments: Vec<&str> = Vec::new();
    for emp in employees {
        if !departments.contains(&emp.department.as_str()) {
            departments.push(emp.department.as_str());
        }
    }

    let department_performance = departments
        .into_iter()
        .map(|dept| {
            let dept_employees: Vec<&user::Model> = employees
                .iter()
                .filter(|e| e.role == user::Role::Employee && e.department == dept)
                .collect();
            let dept_scores: Vec<f64> = completed
                .iter()
                .filter(|r| dept_employees.iter().any(|e| e.employee_id == r.employee_id))
                .filter_map(|r| r.score)
                .collect();
            let dept_avg = if dept_scores.is_empty() {
                0.0
            } else {
                dept_scores.iter().sum::<f64>() / dept_scores.len() as f64
            };
            DepartmentPerformance {
                department: dept.to_string(),
                avg_score: round1(dept_avg),
                employees: dept_employees.len(),
                trend: Trend::from_score(dept_avg),
            }
        })
        .collect();

    let mut ranked = completed.clone();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
    });
    let top_performers = ranked
        .into_iter()
        .take(5)
        .map(|review| {
            let employee = employees
                .iter()
                .find(|e| e.employee_id == review.employee_id);
            let name = if !review.employee_name.is_empty() {
                review.employee_name.clone()
            } else {
                employee
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string())
            };
            let role = review
                .employee_role
                .clone()
                .filter(|r| !r.is_empty())
                .or_else(|| employee.map(|e| e.role.as_str().to_string()))
                .unwrap_or_else(|| "Employee".to_string());
            TopPerformer {
                name,
                role,
                score: review.score.unwrap_or(0.0),
                department: employee
                    .map(|e| e.department.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
            }
        })
        .collect();

    AnalyticsReport {
        avg_performance: round1(avg_score),
        reviews_completed,
        goal_achievement,
        employee_satisfaction: round1(avg_score * 0.8),
        department_performance,
        top_performers,
    }
}

/// Runs the three collection queries concurrently. A failed query is logged
/// and contributes an empty collection, leaving the affected metrics at their
/// zero defaults.
pub(crate) async fn fetch_collections(
    state: &AppState,
) -> (Vec<user::Model>, Vec<review::Model>, Vec<goal::Model>) {
    let (employees, reviews, goals) = tokio::join!(
        user::Entity::find().all(state.db.as_ref()),
        review::Entity::find().all(state.db.as_ref()),
        goal::Entity::find().all(state.db.as_ref()),
    );
    (
        employees.unwrap_or_else(|err| {
            warn!(error = %err, "employees fetch failed; using empty set");
            Vec::new()
        }),
        reviews.unwrap_or_else(|err| {
            warn!(error = %err, "reviews fetch failed; using empty set");
            Vec::new()
        }),
        goals.unwrap_or_else(|err| {
            warn!(error = %err, "goals fetch failed; using empty set");
            Vec::new()
        }),
    )
}

pub async fn get_analytics(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<AnalyticsReport>> {
    current.require_supervisor()?;
    let (employees, reviews, goals) = fetch_collections(&state).await;
    Ok(Json(compute_report(&employees, &reviews, &goals)))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use entity::user::Role;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn employee(name: &str, employee_id: &str, department: &str, role: Role) -> user::Model {
        let now = Utc::now().into();
        user::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@company.com", employee_id.to_lowercase()),
            password_hash: "x".to_string(),
            role,
            department: department.to_string(),
            employee_id: employee_id.to_string(),
            phone: None,
            location: None,
            reporting_to: None,
            join_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    fn review(employee_id: &str, status: review::Status, score: Option<f64>) -> review::Model {
        let now = Utc::now().into();
        review::Model {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            employee_name: String::new(),
            employee_role: None,
            review_type: "Quarterly".to_string(),
            period: "Q4 2025".to_string(),
            status,
            score,
            reviewer: None,
            reviewer_id: None,
            due_date: None,
            completed_date: None,
            ratings: json!({}),
            goals: None,
            achievements: None,
            improvements: None,
            comments: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn goal(employee_id: &str, status: goal::Status) -> goal::Model {
        let now = Utc::now().into();
        goal::Model {
            id: Uuid::new_v4(),
            title: "Goal".to_string(),
            description: String::new(),
            employee_id: employee_id.to_string(),
            employee_name: String::new(),
            employee_role: None,
            category: "Professional Development".to_string(),
            priority: goal::Priority::Medium,
            status,
            progress: 50,
            start_date: None,
            due_date: None,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_input_yields_zero_defaults() {
        let report = compute_report(&[], &[], &[]);
        assert_eq!(report.avg_performance, 0.0);
        assert_eq!(report.reviews_completed, 0.0);
        assert_eq!(report.goal_achievement, 0.0);
        assert_eq!(report.employee_satisfaction, 0.0);
        assert!(report.department_performance.is_empty());
        assert!(report.top_performers.is_empty());
    }

    #[test]
    fn averages_only_cover_completed_scored_reviews() {
        let employees = vec![
            employee("Sarah", "EMP002", "Engineering", Role::Employee),
            employee("Michael", "EMP003", "Product", Role::Employee),
        ];
        let reviews = vec![
            review("EMP002", review::Status::Completed, Some(4.5)),
            review("EMP003", review::Status::Completed, Some(3.5)),
            // pending and unscored rows must not count
            review("EMP002", review::Status::Pending, Some(5.0)),
            review("EMP003", review::Status::Completed, None),
            review("EMP003", review::Status::Completed, Some(0.0)),
        ];
        let report = compute_report(&employees, &reviews, &[]);
        assert_eq!(report.avg_performance, 4.0);
        // 2 completed reviews over 2 employees
        assert_eq!(report.reviews_completed, 100.0);
        assert_eq!(report.employee_satisfaction, 3.2);
    }

    #[test]
    fn satisfaction_derives_from_unrounded_average() {
        let employees = vec![employee("A", "EMP010", "Ops", Role::Employee)];
        let reviews = vec![
            review("EMP010", review::Status::Completed, Some(4.4)),
            review("EMP010", review::Status::Completed, Some(4.5)),
        ];
        let report = compute_report(&employees, &reviews, &[]);
        // avg 4.45 rounds to 4.5 for display, satisfaction uses 4.45 * 0.8
        assert_eq!(report.avg_performance, 4.5);
        assert_eq!(report.employee_satisfaction, 3.6);
    }

    #[test]
    fn goal_achievement_is_rounded_percentage() {
        let goals = vec![
            goal("EMP002", goal::Status::Completed),
            goal("EMP002", goal::Status::InProgress),
            goal("EMP003", goal::Status::InProgress),
        ];
        let report = compute_report(&[], &[], &goals);
        // 1/3 rounds to 33
        assert_eq!(report.goal_achievement, 33.0);
    }

    #[test]
    fn department_trend_thresholds() {
        let employees = vec![
            employee("A", "EMP001", "Engineering", Role::Employee),
            employee("B", "EMP002", "Product", Role::Employee),
            employee("C", "EMP003", "Design", Role::Employee),
        ];
        let reviews = vec![
            review("EMP001", review::Status::Completed, Some(4.0)),
            review("EMP002", review::Status::Completed, Some(3.5)),
            review("EMP003", review::Status::Completed, Some(3.4)),
        ];
        let report = compute_report(&employees, &reviews, &[]);
        let trends: Vec<(&str, Trend)> = report
            .department_performance
            .iter()
            .map(|d| (d.department.as_str(), d.trend))
            .collect();
        assert_eq!(
            trends,
            vec![
                ("Engineering", Trend::Up),
                ("Product", Trend::Stable),
                ("Design", Trend::Down),
            ]
        );
    }

    #[test]
    fn departments_keep_first_seen_order_and_count_only_employees() {
        let employees = vec![
            employee("Admin", "EMP001", "IT", Role::Admin),
            employee("Head", "HOD001", "Engineering", Role::Hod),
            employee("Sarah", "EMP002", "Engineering", Role::Employee),
        ];
        let report = compute_report(&employees, &[], &[]);
        let depts: Vec<(&str, usize)> = report
            .department_performance
            .iter()
            .map(|d| (d.department.as_str(), d.employees))
            .collect();
        // IT appears first (admin works there) but has no employee-role members
        assert_eq!(depts, vec![("IT", 0), ("Engineering", 1)]);
        assert_eq!(report.department_performance[0].trend, Trend::Down);
    }

    #[test]
    fn top_performers_are_capped_at_five_and_sorted() {
        let employees: Vec<user::Model> = (1..=7)
            .map(|i| {
                employee(
                    &format!("Emp {i}"),
                    &format!("EMP{i:03}"),
                    "Engineering",
                    Role::Employee,
                )
            })
            .collect();
        let reviews: Vec<review::Model> = (1..=7)
            .map(|i| {
                review(
                    &format!("EMP{i:03}"),
                    review::Status::Completed,
                    Some(i as f64 * 0.5),
                )
            })
            .collect();
        let report = compute_report(&employees, &reviews, &[]);
        assert_eq!(report.top_performers.len(), 5);
        let scores: Vec<f64> = report.top_performers.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![3.5, 3.0, 2.5, 2.0, 1.5]);
        assert_eq!(report.top_performers[0].name, "Emp 7");
    }

    #[test]
    fn top_performer_fields_fall_back_when_records_are_sparse() {
        let reviews = vec![review("EMP999", review::Status::Completed, Some(4.2))];
        let report = compute_report(&[], &reviews, &[]);
        let top = &report.top_performers[0];
        assert_eq!(top.name, "Unknown");
        assert_eq!(top.role, "Employee");
        assert_eq!(top.department, "Unknown");
    }
}
