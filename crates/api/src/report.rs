use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};

use crate::{
    analytics::{compute_report, fetch_collections, AnalyticsReport},
    auth::CurrentUser,
    error::ApiResult,
    state::AppState,
};

/// Fixed organization-wide goal progress table shown at the bottom of the
/// report: (category, current progress %, target %).
const ORG_GOAL_PROGRESS: [(&str, u32, u32); 5] = [
    ("Technical Skills", 85, 90),
    ("Leadership", 72, 80),
    ("Communication", 88, 85),
    ("Innovation", 65, 75),
    ("Collaboration", 92, 90),
];

pub fn quarter_label(at: DateTime<Utc>) -> String {
    let quarter = (at.month() - 1) / 3 + 1;
    format!("Q{} {}", quarter, at.year())
}

pub fn report_filename(at: DateTime<Utc>) -> String {
    format!("PMS_Analytics_Report_{}.csv", at.format("%Y-%m-%d"))
}

/// Renders without trailing zeros, matching how the numbers display in the
/// dashboard (`4` rather than `4.0`, `4.5` unchanged).
fn fmt_number(value: f64) -> String {
    format!("{}", value)
}

fn push_row<I, S>(rows: &mut Vec<String>, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = fields
        .into_iter()
        .map(|f| format!("\"{}\"", f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    rows.push(line);
}

/// Renders the report as CSV: every field double-quoted, sections separated
/// by blank lines, in summary / department / top performers / goal progress
/// order.
pub fn render_csv(report: &AnalyticsReport, generated_at: DateTime<Utc>, period: &str) -> String {
    let mut rows: Vec<String> = Vec::new();

    push_row(
        &mut rows,
        [
            "Report Type",
            "Generated At",
            "Period",
            "Avg Performance",
            "Reviews Completed %",
            "Goal Achievement %",
            "Employee Satisfaction",
        ],
    );
    push_row(
        &mut rows,
        [
            "Performance Analytics Summary".to_string(),
            generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            period.to_string(),
            fmt_number(report.avg_performance),
            fmt_number(report.reviews_completed),
            fmt_number(report.goal_achievement),
            fmt_number(report.employee_satisfaction),
        ],
    );
    rows.push(String::new());

    push_row(&mut rows, ["Department Performance"]);
    push_row(&mut rows, ["Department", "Average Score", "Employees", "Trend"]);
    for dept in &report.department_performance {
        push_row(
            &mut rows,
            [
                dept.department.clone(),
                fmt_number(dept.avg_score),
                dept.employees.to_string(),
                dept.trend.as_str().to_string(),
            ],
        );
    }
    rows.push(String::new());

    push_row(&mut rows, ["Top Performers"]);
    push_row(&mut rows, ["Rank", "Name", "Role", "Score", "Department"]);
    for (index, performer) in report.top_performers.iter().enumerate() {
        push_row(
            &mut rows,
            [
                (index + 1).to_string(),
                performer.name.clone(),
                performer.role.clone(),
                fmt_number(performer.score),
                performer.department.clone(),
            ],
        );
    }
    rows.push(String::new());

    push_row(&mut rows, ["Goal Progress"]);
    push_row(&mut rows, ["Category", "Current Progress %", "Target %"]);
    for (category, progress, target) in ORG_GOAL_PROGRESS {
        push_row(
            &mut rows,
            [category.to_string(), progress.to_string(), target.to_string()],
        );
    }

    rows.join("\n")
}

pub async fn export_analytics(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Response> {
    current.require_supervisor()?;
    let (employees, reviews, goals) = fetch_collections(&state).await;
    let report = compute_report(&employees, &reviews, &goals);
    let now = Utc::now();
    let body = render_csv(&report, now, &quarter_label(now));
    let disposition = format!("attachment; filename=\"{}\"", report_filename(now));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
