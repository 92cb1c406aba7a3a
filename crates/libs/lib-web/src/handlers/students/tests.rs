use crate::test_utils::*;
use axum::http::{Method, StatusCode};
use axum::Router;
use lib_core::dto::{CreatedResponse, MessageResponse, UpdateStudentResponse};
use lib_core::model::store::Student;
use serde_json::{json, Value};

fn ada() -> Value {
    json!({ "name": "Ada", "email": "ada@x.com", "age": 30 })
}

async fn create(app: &Router, cookie: &str, body: Value) -> axum::response::Response {
    send(app, request(Method::POST, "/api/students", Some(body), Some(cookie))).await
}

// ========== Create ==========

#[tokio::test]
async fn test_create_student() {
    let app = test_app().await;
    let cookie = session_cookie("bob");

    let res = create(&app, &cookie, ada()).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: CreatedResponse = body_json(res).await;
    assert_eq!(body.id, 1);
}

#[tokio::test]
async fn test_create_requires_session() {
    let app = test_app().await;

    let res = send(&app, request(Method::POST, "/api/students", Some(ada()), None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = body_json(res).await;
    assert_eq!(body["code"], "Unauthorized");

    // Nothing was written
    let res = send(&app, request(Method::GET, "/api/students", None, None)).await;
    let all: Vec<Student> = body_json(res).await;
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_create_lists_every_missing_field() {
    let app = test_app().await;
    let cookie = session_cookie("bob");

    let res = create(&app, &cookie, json!({ "email": "x@x.com" })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = body_json(res).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("age"));
    assert!(!message.contains("email"));
}

// ========== Read ==========

#[tokio::test]
async fn test_reads_are_public() {
    let app = test_app().await;
    create(&app, &session_cookie("bob"), ada()).await;

    let res = send(&app, request(Method::GET, "/api/students/1", None, None)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let student: Student = body_json(res).await;
    assert_eq!(student.name, "Ada");
    assert_eq!(student.email, "ada@x.com");
    assert_eq!(student.age, 30);

    let res = send(&app, request(Method::GET, "/api/students", None, None)).await;
    let all: Vec<Student> = body_json(res).await;
    assert_eq!(all, vec![student]);
}

#[tokio::test]
async fn test_get_missing_student() {
    let app = test_app().await;

    let res = send(&app, request(Method::GET, "/api/students/42", None, None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = body_json(res).await;
    assert_eq!(body["code"], "NotFound");
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = test_app().await;

    let res = send(&app, request(Method::GET, "/api/students/abc", None, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ========== Update ==========

#[tokio::test]
async fn test_update_student() {
    let app = test_app().await;
    let cookie = session_cookie("bob");
    create(&app, &cookie, ada()).await;

    let res = send(
        &app,
        request(
            Method::PUT,
            "/api/students/1",
            Some(json!({ "name": "Ada L.", "email": "ada@x.com", "age": 31 })),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: UpdateStudentResponse = body_json(res).await;
    assert_eq!(body.message, "Student updated successfully");
    assert_eq!(body.updated_student.name, "Ada L.");
    assert_eq!(body.updated_student.age, 31);

    let res = send(&app, request(Method::GET, "/api/students/1", None, None)).await;
    let student: Student = body_json(res).await;
    assert_eq!(student, body.updated_student);
}

#[tokio::test]
async fn test_update_missing_student() {
    let app = test_app().await;

    let res = send(
        &app,
        request(Method::PUT, "/api/students/9", Some(ada()), Some(&session_cookie("bob"))),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_requires_session_and_valid_body() {
    let app = test_app().await;
    create(&app, &session_cookie("bob"), ada()).await;

    let res = send(&app, request(Method::PUT, "/api/students/1", Some(ada()), None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send(
        &app,
        request(
            Method::PUT,
            "/api/students/1",
            Some(json!({ "name": "Ada" })),
            Some(&session_cookie("bob")),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ========== Delete ==========

#[tokio::test]
async fn test_delete_student() {
    let app = test_app().await;
    let cookie = session_cookie("bob");
    create(&app, &cookie, ada()).await;

    let res = send(&app, request(Method::DELETE, "/api/students/1", None, Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: MessageResponse = body_json(res).await;
    assert_eq!(body.message, "Student deleted successfully");

    let res = send(&app, request(Method::GET, "/api/students/1", None, None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, request(Method::DELETE, "/api/students/1", None, Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_session() {
    let app = test_app().await;
    create(&app, &session_cookie("bob"), ada()).await;

    let res = send(&app, request(Method::DELETE, "/api/students/1", None, None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send(&app, request(Method::GET, "/api/students/1", None, None)).await;
    assert_eq!(res.status(), StatusCode::OK);
}

// ========== End to end ==========

#[tokio::test]
async fn test_register_login_then_manage_students() {
    let app = test_app().await;
    let creds = json!({ "username": "bob", "password": "secret" });

    send(&app, request(Method::POST, "/api/users/register", Some(creds.clone()), None)).await;
    let res = send(&app, request(Method::POST, "/api/users/login", Some(creds), None)).await;
    let cookie = set_cookie(&res).unwrap();
    let cookie = cookie.split(';').next().unwrap().to_string();

    let res = create(&app, &cookie, ada()).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = send(&app, request(Method::POST, "/api/users/logout", None, Some(&cookie))).await;
    let cleared = set_cookie(&res).unwrap();
    let cleared = cleared.split(';').next().unwrap().to_string();

    let res = create(&app, &cleared, ada()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
