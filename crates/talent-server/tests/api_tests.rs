//! API integration tests
//!
//! Drive the full router (middleware, mediator, repositories) against a
//! migrated database. Run with `DATABASE_URL` set and `--ignored`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use talent_server::{api::create_router, config::Config, features::FeatureState};

fn create_test_app(pool: PgPool) -> Router {
    create_router(FeatureState::new(pool), &Config::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_department(app: &Router, name: &str) -> String {
    let (status, body) = send(app, "POST", "/api/v1/departments", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_position(app: &Router, department_id: &str, number: &str, title: &str) -> String {
    let payload = json!({
        "positionNumber": number,
        "positionTitle": title,
        "positionSalary": 75000.0,
        "departmentId": department_id,
    });
    let (status, body) = send(app, "POST", "/api/v1/positions", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_health_reports_database(pool: PgPool) {
    let app = create_test_app(pool);
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], "connected");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_position_lifecycle(pool: PgPool) {
    let app = create_test_app(pool);
    let eng = create_department(&app, "Engineering").await;
    let id = create_position(&app, &eng, "ENG-1", "Engineer").await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/positions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["departmentName"], "Engineering");

    let update = json!({
        "positionNumber": "ENG-1",
        "positionTitle": "Staff Engineer",
        "positionSalary": 150000.0,
        "departmentId": eng,
    });
    let (status, body) = send(&app, "PUT", &format!("/api/v1/positions/{}", id), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["positionTitle"], "Staff Engineer");

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/positions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/api/v1/positions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_create_conflicts_and_missing_department(pool: PgPool) {
    let app = create_test_app(pool);
    let eng = create_department(&app, "Engineering").await;
    create_position(&app, &eng, "ENG-1", "Engineer").await;

    let duplicate = json!({
        "positionNumber": "ENG-1",
        "positionTitle": "Another",
        "positionSalary": 1.0,
        "departmentId": eng,
    });
    let (status, body) = send(&app, "POST", "/api/v1/positions", Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let orphan = json!({
        "positionNumber": "ENG-2",
        "positionTitle": "Orphan",
        "positionSalary": 1.0,
        "departmentId": uuid::Uuid::new_v4(),
    });
    let (status, _) = send(&app, "POST", "/api/v1/positions", Some(orphan)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/v1/departments", Some(json!({ "name": "engineering" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_list_positions_envelope(pool: PgPool) {
    let app = create_test_app(pool);
    let eng = create_department(&app, "Engineering").await;
    let ops = create_department(&app, "Operations").await;
    create_position(&app, &eng, "ENG-1", "Engineer").await;
    create_position(&app, &eng, "ENG-2", "Senior Engineer").await;
    create_position(&app, &ops, "OPS-1", "Coordinator").await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/positions?pageSize=1&orderBy=positionNumber%20desc&fields=positionNumber,Department.Name&department=engineering",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["meta"]["recordsTotal"], 3);
    assert_eq!(body["meta"]["recordsFiltered"], 2);
    assert_eq!(body["meta"]["pagination"]["pages"], 2);
    assert_eq!(
        body["data"],
        json!([{ "positionNumber": "ENG-2", "departmentName": "Engineering" }])
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_datatables_paging(pool: PgPool) {
    let app = create_test_app(pool);
    let eng = create_department(&app, "Engineering").await;
    let ops = create_department(&app, "Operations").await;
    for i in 1..=4 {
        create_position(&app, &eng, &format!("ENG-{}", i), "Engineer").await;
    }
    create_position(&app, &ops, "OPS-1", "Coordinator").await;

    let request = json!({
        "draw": 3,
        "start": 2,
        "length": 2,
        "order": [{ "column": 0, "dir": "asc" }],
        "search": { "value": "eng", "regex": false },
        "columns": []
    });
    let (status, body) = send(&app, "POST", "/api/v1/positions/paged", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draw"], 3);
    assert_eq!(body["recordsTotal"], 5);
    assert_eq!(body["recordsFiltered"], 4);
    let numbers: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["positionNumber"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["ENG-3", "ENG-4"]);
}
