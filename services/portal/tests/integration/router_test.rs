use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use portal::router::build_router;
use portal::state::AppState;
use portal_core::middleware::X_REQUEST_ID;
use portal_testing::auth::MockAuth;

/// Server backed by a disconnected database. Only paths that fail before
/// touching persistence are exercised here.
fn server() -> TestServer {
    TestServer::new(build_router(AppState::new(DatabaseConnection::Disconnected))).unwrap()
}

fn with_auth(mut req: axum_test::TestRequest, auth: &MockAuth) -> axum_test::TestRequest {
    for (name, value) in auth.headers().iter() {
        req = req.add_header(name.clone(), value.clone());
    }
    req
}

#[tokio::test]
async fn should_answer_health_probes() {
    let server = server();
    assert_eq!(server.get("/healthz").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/readyz").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_attach_request_id() {
    let response = server().get("/healthz").await;
    assert!(response.headers().contains_key(X_REQUEST_ID));
}

#[tokio::test]
async fn should_reject_missing_identity() {
    let server = server();
    for path in ["/me", "/courses", "/enrollments", "/timetable"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn should_return_landing_path_for_role() {
    let server = server();

    let student: Value = with_auth(server.get("/me"), &MockAuth::student("s-1"))
        .await
        .json();
    assert_eq!(student["id"], "s-1");
    assert_eq!(student["role"], "student");
    assert_eq!(student["landing_path"], "/home");

    let admin: Value = with_auth(server.get("/me"), &MockAuth::admin("a-1"))
        .await
        .json();
    assert_eq!(admin["role"], "admin");
    assert_eq!(admin["landing_path"], "/admin/dashboard");
}

#[tokio::test]
async fn should_forbid_students_on_admin_routes() {
    let server = server();
    let student = MockAuth::student("s-1");

    let cases = [
        with_auth(server.get("/teachers"), &student),
        with_auth(server.get("/schedules"), &student),
        with_auth(server.get("/schedules/1"), &student),
        with_auth(server.delete("/schedules/1"), &student),
        with_auth(server.delete("/courses/1"), &student),
        with_auth(server.post("/teachers"), &student).json(&json!({ "name": "Ada" })),
        with_auth(server.post("/courses"), &student).json(&json!({
            "code": "CS101",
            "name": "Intro",
            "faculty": "Engineering",
            "duration": "1 semester",
        })),
    ];
    for request in cases {
        let response = request.await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        let body: Value = response.json();
        assert_eq!(body["kind"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn should_reject_empty_registration_request() {
    let response = with_auth(server().post("/enrollments"), &MockAuth::student("s-1"))
        .json(&json!({ "course_ids": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_REQUEST");
}

#[tokio::test]
async fn should_validate_course_before_persisting() {
    let response = with_auth(server().post("/courses"), &MockAuth::admin("a-1"))
        .json(&json!({
            "code": "WAY-TOO-LONG-CODE",
            "name": "Intro",
            "faculty": "Engineering",
            "duration": "1 semester",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_COURSE");
    assert_eq!(
        body["message"],
        "invalid course: code must be at most 10 characters"
    );
}

#[tokio::test]
async fn should_validate_schedule_before_persisting() {
    let response = with_auth(server().post("/schedules"), &MockAuth::admin("a-1"))
        .json(&json!({
            "course_id": 1,
            "teacher_id": 1,
            "day_of_week": 8,
            "start_time": "09:00",
            "end_time": "10:30",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_SCHEDULE");
}

#[tokio::test]
async fn should_validate_teacher_before_persisting() {
    let response = with_auth(server().post("/teachers"), &MockAuth::admin("a-1"))
        .json(&json!({ "name": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_TEACHER");
}

#[tokio::test]
async fn should_reject_malformed_registration_body_as_invalid_request() {
    let server = server();
    let student = MockAuth::student("s-1");

    for body in [json!({ "course_ids": "abc" }), json!({ "course_ids": [1, "x"] })] {
        let response = with_auth(server.post("/enrollments"), &student)
            .json(&body)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body}");
        let body: Value = response.json();
        assert_eq!(body["kind"], "INVALID_REQUEST");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("invalid request: ")
        );
    }
}

#[tokio::test]
async fn should_reject_malformed_course_and_teacher_bodies_as_invalid_request() {
    let server = server();
    let admin = MockAuth::admin("a-1");

    let course = with_auth(server.post("/courses"), &admin)
        .json(&json!({ "code": "CS101" }))
        .await;
    assert_eq!(course.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(course.json::<Value>()["kind"], "INVALID_REQUEST");

    let teacher = with_auth(server.post("/teachers"), &admin)
        .json(&json!({ "name": 42 }))
        .await;
    assert_eq!(teacher.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(teacher.json::<Value>()["kind"], "INVALID_REQUEST");
}

#[tokio::test]
async fn should_reject_malformed_schedule_body_as_invalid_schedule() {
    let server = server();
    let admin = MockAuth::admin("a-1");

    let bodies = [
        json!({
            "course_id": 1,
            "teacher_id": 1,
            "day_of_week": 300,
            "start_time": "09:00",
            "end_time": "10:30",
        }),
        json!({
            "course_id": 1,
            "teacher_id": 1,
            "day_of_week": 2,
            "start_time": "nine",
            "end_time": "10:30",
        }),
    ];
    for body in bodies {
        let response = with_auth(server.post("/schedules"), &admin)
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.json::<Value>()["kind"], "INVALID_SCHEDULE");
    }

    let update = with_auth(server.put("/schedules/1"), &admin)
        .json(&json!({ "course_id": "one" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(update.json::<Value>()["kind"], "INVALID_SCHEDULE");
}
