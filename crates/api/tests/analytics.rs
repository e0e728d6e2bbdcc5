mod common;

use axum::http::{header, Method, StatusCode};
use entity::user::Role;
use serde_json::json;

use common::TestContext;

#[tokio::test]
async fn seeded_dataset_produces_expected_metrics() {
    let (ctx, seeded) = TestContext::new_seeded().await;
    let hod = seeded.user_email("hod@company.com").unwrap();
    let token = ctx.token_for(hod);

    let (status, _, body) = ctx
        .request(Method::GET, "/api/analytics", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // one completed review (4.5) over three employee-role users
    assert_eq!(body["avgPerformance"], json!(4.5));
    assert_eq!(body["reviewsCompleted"].as_f64().unwrap(), 33.0);
    assert_eq!(body["goalAchievement"].as_f64().unwrap(), 0.0);
    assert_eq!(body["employeeSatisfaction"], json!(3.6));

    let departments = body["departmentPerformance"].as_array().unwrap();
    let names: Vec<&str> = departments
        .iter()
        .map(|d| d["department"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["IT", "Engineering", "Product", "Design"]);

    let engineering = &departments[1];
    assert_eq!(engineering["avgScore"], json!(4.5));
    // the HOD works in Engineering but only employee-role users count
    assert_eq!(engineering["employees"], json!(1));
    assert_eq!(engineering["trend"], json!("up"));

    let it = &departments[0];
    assert_eq!(it["employees"], json!(0));
    assert_eq!(it["trend"], json!("down"));

    let top = body["topPerformers"].as_array().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["name"], json!("Sarah Johnson"));
    assert_eq!(top[0]["role"], json!("Software Engineer"));
    assert_eq!(top[0]["score"], json!(4.5));
    assert_eq!(top[0]["department"], json!("Engineering"));
}

#[tokio::test]
async fn analytics_requires_a_supervisor_role() {
    let (ctx, seeded) = TestContext::new_seeded().await;
    let employee = seeded.user_email("employee@company.com").unwrap();
    let token = ctx.token_for(employee);

    for uri in ["/api/analytics", "/api/analytics/export"] {
        let (status, _, body) = ctx.request(Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "route {uri}");
        assert_eq!(body["error"], json!("Supervisor access required"));
    }
}

#[tokio::test]
async fn empty_database_yields_zero_metrics() {
    let ctx = TestContext::new().await;
    let admin = ctx.insert_user("Admin", "EMP001", "IT", Role::Admin).await;
    let token = ctx.token_for(&admin);

    let (status, _, body) = ctx
        .request(Method::GET, "/api/analytics", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avgPerformance"].as_f64().unwrap(), 0.0);
    assert_eq!(body["reviewsCompleted"].as_f64().unwrap(), 0.0);
    assert_eq!(body["goalAchievement"].as_f64().unwrap(), 0.0);
    assert_eq!(body["topPerformers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn csv_export_carries_the_report_as_an_attachment() {
    let (ctx, seeded) = TestContext::new_seeded().await;
    let admin = seeded.user_email("admin@company.com").unwrap();
    let token = ctx.token_for(admin);

    let (status, headers, body) = ctx
        .request_raw(Method::GET, "/api/analytics/export", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let content_type = headers[header::CONTENT_TYPE].to_str().unwrap();
    assert_eq!(content_type, "text/csv; charset=utf-8");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"PMS_Analytics_Report_"));
    assert!(disposition.ends_with(".csv\""));

    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines[0],
        "\"Report Type\",\"Generated At\",\"Period\",\"Avg Performance\",\"Reviews Completed %\",\"Goal Achievement %\",\"Employee Satisfaction\""
    );
    assert!(lines[1].starts_with("\"Performance Analytics Summary\","));
    assert!(body.contains("\"Department Performance\""));
    assert!(body.contains("\"Engineering\",\"4.5\",\"1\",\"up\""));
    assert!(body.contains("\"1\",\"Sarah Johnson\",\"Software Engineer\",\"4.5\",\"Engineering\""));
    assert!(body.contains("\"Goal Progress\""));
    assert!(body.contains("\"Collaboration\",\"92\",\"90\""));
}
