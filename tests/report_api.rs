use axum::http::StatusCode;
use serde_json::{Value, json};

mod helpers;
use helpers::{
    create_report, register_and_login, sample_report_payload, setup_test_environment,
};

#[tokio::test]
async fn test_create_and_list_report_end_to_end() {
    let (server, _pool) = setup_test_environment().await;
    let (_user_id, token) = register_and_login(&server, "alice", "lecturer").await;

    let report_id = create_report(&server, &token, &sample_report_payload()).await;

    let response = server.get("/api/reports").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let reports = body.as_array().expect("report list");
    assert_eq!(reports.len(), 1);

    let report = &reports[0];
    assert_eq!(report["id"].as_i64(), Some(report_id as i64));
    assert_eq!(report["created_by_name"], "alice");
    assert_eq!(report["actual_present"], 18);
    assert_eq!(report["total_registered"], 20);
    // attendance derivable as 18/20 = 90%
}

#[tokio::test]
async fn test_list_reports_ordered_by_lecture_date_desc() {
    let (server, _pool) = setup_test_environment().await;
    let (_user_id, token) = register_and_login(&server, "alice", "lecturer").await;

    let mut older = sample_report_payload();
    older["dateOfLecture"] = json!("2025-03-03");
    let older_id = create_report(&server, &token, &older).await;

    let mut newer = sample_report_payload();
    newer["dateOfLecture"] = json!("2025-03-17");
    let newer_id = create_report(&server, &token, &newer).await;

    let response = server.get("/api/reports").authorization_bearer(&token).await;
    let body: Value = response.json();
    let reports = body.as_array().unwrap();
    assert_eq!(reports[0]["id"].as_i64(), Some(newer_id as i64));
    assert_eq!(reports[1]["id"].as_i64(), Some(older_id as i64));
}

#[tokio::test]
async fn test_get_report_by_id() {
    let (server, _pool) = setup_test_environment().await;
    let (_user_id, token) = register_and_login(&server, "alice", "lecturer").await;
    let report_id = create_report(&server, &token, &sample_report_payload()).await;

    let response = server
        .get(&format!("/api/reports/{report_id}"))
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["topic_taught"], "REST APIs and JSON");
    assert_eq!(body["created_by_name"], "alice");
    assert!(body["prl_feedback"].is_null());
}

#[tokio::test]
async fn test_get_missing_report_not_found() {
    let (server, _pool) = setup_test_environment().await;
    let (_user_id, token) = register_and_login(&server, "alice", "lecturer").await;

    let response = server
        .get("/api/reports/999999")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

// PRL feedback

#[tokio::test]
async fn test_prl_feedback_overwrites_on_each_write() {
    let (server, _pool) = setup_test_environment().await;
    let (_lecturer_id, lecturer_token) = register_and_login(&server, "alice", "lecturer").await;
    let (_prl_id, prl_token) = register_and_login(&server, "paulina", "prl").await;
    let report_id = create_report(&server, &lecturer_token, &sample_report_payload()).await;

    let first = server
        .post(&format!("/api/reports/{report_id}/feedback"))
        .authorization_bearer(&prl_token)
        .json(&json!({"feedback": "Needs more detail on outcomes"}))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let second = server
        .post(&format!("/api/reports/{report_id}/feedback"))
        .authorization_bearer(&prl_token)
        .json(&json!({"feedback": "Much improved"}))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);

    let report: Value = server
        .get(&format!("/api/reports/{report_id}"))
        .authorization_bearer(&lecturer_token)
        .await
        .json();
    assert_eq!(report["prl_feedback"], "Much improved");
    assert!(report["pl_feedback"].is_null());
}

#[tokio::test]
async fn test_prl_feedback_requires_prl_role() {
    let (server, _pool) = setup_test_environment().await;
    let (_lecturer_id, lecturer_token) = register_and_login(&server, "alice", "lecturer").await;
    let (_student_id, student_token) = register_and_login(&server, "bob", "student").await;
    let report_id = create_report(&server, &lecturer_token, &sample_report_payload()).await;

    let response = server
        .post(&format!("/api/reports/{report_id}/feedback"))
        .authorization_bearer(&student_token)
        .json(&json!({"feedback": "I am not a PRL"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

// PL feedback

#[tokio::test]
async fn test_pl_feedback_roundtrip_and_role_gate() {
    let (server, _pool) = setup_test_environment().await;
    let (_lecturer_id, lecturer_token) = register_and_login(&server, "alice", "lecturer").await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;
    let (_prl_id, prl_token) = register_and_login(&server, "paulina", "prl").await;
    let report_id = create_report(&server, &lecturer_token, &sample_report_payload()).await;

    // a PRL cannot write the PL field
    let denied = server
        .post(&format!("/api/reports/{report_id}/pl-feedback"))
        .authorization_bearer(&prl_token)
        .json(&json!({"feedback": "wrong lane"}))
        .await;
    assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);

    let accepted = server
        .post(&format!("/api/reports/{report_id}/pl-feedback"))
        .authorization_bearer(&pl_token)
        .json(&json!({"feedback": "Good coverage this week"}))
        .await;
    assert_eq!(accepted.status_code(), StatusCode::OK);

    let report: Value = server
        .get(&format!("/api/reports/{report_id}"))
        .authorization_bearer(&lecturer_token)
        .await
        .json();
    assert_eq!(report["pl_feedback"], "Good coverage this week");
}

#[tokio::test]
async fn test_feedback_on_missing_report_not_found() {
    let (server, _pool) = setup_test_environment().await;
    let (_prl_id, prl_token) = register_and_login(&server, "paulina", "prl").await;

    let response = server
        .post("/api/reports/424242/feedback")
        .authorization_bearer(&prl_token)
        .json(&json!({"feedback": "ghost report"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
