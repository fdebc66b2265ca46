#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response};
use axum::Router;
use broker_api::auth::session::{generate_session_token, SessionConfig};
use broker_api::config::{ServerConfig, StorageConfig};
use broker_api::router::build_app_router;
use broker_api::state::AppState;
use broker_api::storage::storage_from_config;
use broker_core::lookups::{ErrorType, FileStatusKind, FileType, JobStatus, JobType};
use broker_core::types::DbId;
use broker_db::models::error_data::CreateErrorData;
use broker_db::models::file_status::CreateFileStatus;
use broker_db::models::job::{CreateJob, Job};
use broker_db::models::submission::{CreateSubmission, Submission};
use broker_db::repositories::{ErrorDataRepo, FileStatusRepo, JobRepo, SubmissionRepo};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-session-secret";
pub const BROKER_FILES: &str = "/tmp/broker-files";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and local storage.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
            expiry_mins: 60,
        },
        storage: StorageConfig::Local {
            broker_files: PathBuf::from(BROKER_FILES),
        },
    }
}

/// Build the full application router, using the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        storage: storage_from_config(&config.storage),
        config: Arc::new(config),
    };
    build_app_router(state)
}

/// A session token for `user_id` signed with the test secret.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_session_token(user_id, role, &test_config().session)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn insert_submission(pool: &PgPool, user_id: DbId) -> Submission {
    let input = CreateSubmission {
        user_id,
        agency_name: Some("Department of the Treasury".to_string()),
        reporting_start_date: NaiveDate::from_ymd_opt(2016, 4, 1),
        reporting_end_date: NaiveDate::from_ymd_opt(2016, 4, 2),
    };
    SubmissionRepo::create(pool, &input)
        .await
        .expect("submission creation should succeed")
}

pub async fn insert_job(
    pool: &PgPool,
    submission_id: DbId,
    file_type: FileType,
    file_size: Option<i64>,
    number_of_rows: Option<i64>,
) -> Job {
    let input = CreateJob {
        submission_id,
        file_type,
        job_type: JobType::CsvRecordValidation,
        status: JobStatus::Finished,
        original_filename: Some(format!("{file_type}.csv")),
        filename: Some(format!("1/1460000000_{file_type}.csv")),
        file_size,
        number_of_rows,
    };
    JobRepo::create(pool, &input)
        .await
        .expect("job creation should succeed")
}

pub async fn insert_file_status(
    pool: &PgPool,
    job_id: DbId,
    status: FileStatusKind,
    missing_headers: &[&str],
    duplicated_headers: &[&str],
) {
    let input = CreateFileStatus {
        job_id,
        filename: "file.csv".to_string(),
        status,
        missing_headers: missing_headers.iter().map(|h| h.to_string()).collect(),
        duplicated_headers: duplicated_headers.iter().map(|h| h.to_string()).collect(),
        row_errors_present: false,
    };
    FileStatusRepo::create(pool, &input)
        .await
        .expect("file status creation should succeed");
}

pub async fn insert_error(
    pool: &PgPool,
    job_id: DbId,
    field_name: &str,
    error_type: ErrorType,
    occurrences: i64,
    rule_failed: Option<&str>,
) {
    let input = CreateErrorData {
        job_id,
        filename: "file.csv".to_string(),
        field_name: field_name.to_string(),
        error_type,
        occurrences,
        first_row: Some(2),
        rule_failed: rule_failed.map(str::to_string),
    };
    ErrorDataRepo::create(pool, &input)
        .await
        .expect("error data creation should succeed");
}
