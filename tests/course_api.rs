use axum::http::StatusCode;
use serde_json::{Value, json};

mod helpers;
use helpers::{
    create_course, delete_user_directly, register_and_login, register_user,
    setup_test_environment,
};

#[tokio::test]
async fn test_create_course_returns_row_with_lecturer_name() {
    let (server, _pool) = setup_test_environment().await;
    let lecturer_id = register_user(&server, "alice", "lecturer").await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;

    let course = create_course(
        &server,
        &pl_token,
        "Web Application Development",
        "DIWA2110",
        Some(lecturer_id),
    )
    .await;

    assert_eq!(course["name"], "Web Application Development");
    assert_eq!(course["code"], "DIWA2110");
    assert_eq!(course["lecturer_id"].as_i64(), Some(lecturer_id as i64));
    assert_eq!(course["lecturer_name"], "alice");
}

#[tokio::test]
async fn test_create_course_duplicate_code_conflict() {
    let (server, _pool) = setup_test_environment().await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;
    create_course(&server, &pl_token, "Networking", "NET2100", None).await;

    let response = server
        .post("/api/courses")
        .authorization_bearer(&pl_token)
        .json(&json!({"name": "Networking II", "code": "NET2100"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "Course code already exists");
}

#[tokio::test]
async fn test_course_mutations_require_pl_role() {
    let (server, _pool) = setup_test_environment().await;
    let (_lecturer_id, lecturer_token) = register_and_login(&server, "alice", "lecturer").await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;
    let course = create_course(&server, &pl_token, "Networking", "NET2100", None).await;
    let course_id = course["id"].as_i64().unwrap();

    let create = server
        .post("/api/courses")
        .authorization_bearer(&lecturer_token)
        .json(&json!({"name": "Rogue Course", "code": "RGU1000"}))
        .await;
    assert_eq!(create.status_code(), StatusCode::FORBIDDEN);

    let update = server
        .put(&format!("/api/courses/{course_id}"))
        .authorization_bearer(&lecturer_token)
        .json(&json!({"name": "Hijacked", "code": "NET2100"}))
        .await;
    assert_eq!(update.status_code(), StatusCode::FORBIDDEN);

    let delete = server
        .delete(&format!("/api/courses/{course_id}"))
        .authorization_bearer(&lecturer_token)
        .await;
    assert_eq!(delete.status_code(), StatusCode::FORBIDDEN);

    // listing stays open to any authenticated user
    let list = server
        .get("/api/courses")
        .authorization_bearer(&lecturer_token)
        .await;
    assert_eq!(list.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_courses_alphabetical() {
    let (server, _pool) = setup_test_environment().await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;
    create_course(&server, &pl_token, "Zoology Informatics", "ZOO3000", None).await;
    create_course(&server, &pl_token, "Algorithms", "ALG2000", None).await;

    let list: Value = server
        .get("/api/courses")
        .authorization_bearer(&pl_token)
        .await
        .json();
    let courses = list.as_array().unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["name"], "Algorithms");
    assert_eq!(courses[1]["name"], "Zoology Informatics");
}

#[tokio::test]
async fn test_update_course() {
    let (server, _pool) = setup_test_environment().await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;
    let course = create_course(&server, &pl_token, "Networking", "NET2100", None).await;
    let course_id = course["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/courses/{course_id}"))
        .authorization_bearer(&pl_token)
        .json(&json!({"name": "Networking Fundamentals", "code": "NET2101"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let list: Value = server
        .get("/api/courses")
        .authorization_bearer(&pl_token)
        .await
        .json();
    assert_eq!(list.as_array().unwrap()[0]["code"], "NET2101");
}

#[tokio::test]
async fn test_update_missing_course_not_found() {
    let (server, _pool) = setup_test_environment().await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;

    let response = server
        .put("/api/courses/999999")
        .authorization_bearer(&pl_token)
        .json(&json!({"name": "Ghost", "code": "GST0000"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_course() {
    let (server, _pool) = setup_test_environment().await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;
    let course = create_course(&server, &pl_token, "Networking", "NET2100", None).await;
    let course_id = course["id"].as_i64().unwrap();

    let response = server
        .delete(&format!("/api/courses/{course_id}"))
        .authorization_bearer(&pl_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let again = server
        .delete(&format!("/api/courses/{course_id}"))
        .authorization_bearer(&pl_token)
        .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_lecturer_nulls_course_reference() {
    let (server, pool) = setup_test_environment().await;
    let lecturer_id = register_user(&server, "alice", "lecturer").await;
    let (_pl_id, pl_token) = register_and_login(&server, "petra", "pl").await;
    create_course(&server, &pl_token, "Networking", "NET2100", Some(lecturer_id)).await;

    delete_user_directly(&pool, lecturer_id).await;

    let list: Value = server
        .get("/api/courses")
        .authorization_bearer(&pl_token)
        .await
        .json();
    let course = &list.as_array().unwrap()[0];
    assert!(course["lecturer_id"].is_null());
    assert!(course["lecturer_name"].is_null());
}
