//! Integration tests for the submission and job repositories.
//!
//! Exercises the repository layer against a real database:
//! - Submission + job creation in one transaction
//! - Re-submission superseding jobs while preserving identity
//! - Upload finalization state transition
//! - File status uniqueness and error data aggregation

use broker_core::lookups::{ErrorType, FileStatusKind, FileType, JobStatus, JobType};
use broker_db::models::error_data::CreateErrorData;
use broker_db::models::file_status::CreateFileStatus;
use broker_db::models::job::{CreateJob, NewUpload};
use broker_db::models::submission::{CreateSubmission, UpdateReportingPeriod};
use broker_db::repositories::{ErrorDataRepo, FileStatusRepo, JobRepo, SubmissionRepo};
use chrono::NaiveDate;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn new_submission(user_id: i64) -> CreateSubmission {
    CreateSubmission {
        user_id,
        agency_name: Some("Department of the Treasury".to_string()),
        reporting_start_date: date(2001, 1, 13),
        reporting_end_date: date(2001, 1, 14),
    }
}

fn upload(file_type: FileType, name: &str) -> NewUpload {
    NewUpload {
        file_type,
        original_filename: name.to_string(),
        upload_key: format!("1/1000_{name}"),
    }
}

fn all_uploads() -> Vec<NewUpload> {
    vec![
        upload(FileType::Appropriations, "test1.csv"),
        upload(FileType::AwardFinancial, "test2.csv"),
        upload(FileType::Award, "test3.csv"),
        upload(FileType::ProgramActivity, "test4.csv"),
    ]
}

fn validation_job(submission_id: i64, file_type: FileType) -> CreateJob {
    CreateJob {
        submission_id,
        file_type,
        job_type: JobType::CsvRecordValidation,
        status: JobStatus::Ready,
        original_filename: None,
        filename: None,
        file_size: None,
        number_of_rows: None,
    }
}

fn error_row(job_id: i64, occurrences: i64) -> CreateErrorData {
    CreateErrorData {
        job_id,
        filename: "approp.csv".to_string(),
        field_name: "header_three".to_string(),
        error_type: ErrorType::RuleFailed,
        occurrences,
        first_row: None,
        rule_failed: Some("Header three value must be real".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_uploads_creates_one_waiting_job_per_file(pool: PgPool) {
    let (submission, jobs) =
        SubmissionRepo::create_with_uploads(&pool, &new_submission(1), &all_uploads())
            .await
            .unwrap();

    assert_eq!(submission.user_id, 1);
    assert_eq!(jobs.len(), 4);
    for job in &jobs {
        assert_eq!(job.submission_id, submission.id);
        assert_eq!(job.status().unwrap(), JobStatus::Waiting);
        assert_eq!(job.job_type().unwrap(), JobType::CsvRecordValidation);
        assert!(job.superseded_at.is_none());
    }

    let approp = jobs
        .iter()
        .find(|j| j.file_type().unwrap() == FileType::Appropriations)
        .unwrap();
    assert_eq!(approp.original_filename.as_deref(), Some("test1.csv"));
    assert_eq!(approp.filename.as_deref(), Some("1/1000_test1.csv"));

    let listed = JobRepo::list_by_submission(&pool, submission.id).await.unwrap();
    assert_eq!(listed.len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inverted_reporting_period_is_rejected_by_database(pool: PgPool) {
    let mut input = new_submission(1);
    input.reporting_start_date = date(2016, 4, 2);
    input.reporting_end_date = date(2016, 4, 1);

    let result = SubmissionRepo::create(&pool, &input).await;

    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_job_insert_rolls_back_submission(pool: PgPool) {
    // Two uploads of the same file type collide on `uq_jobs_current`.
    let uploads = vec![
        upload(FileType::Award, "a.csv"),
        upload(FileType::Award, "b.csv"),
    ];

    let result = SubmissionRepo::create_with_uploads(&pool, &new_submission(1), &uploads).await;
    assert!(result.is_err());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "submission insert must roll back with its jobs");
}

// ---------------------------------------------------------------------------
// Re-submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_supersedes_only_supplied_file_types(pool: PgPool) {
    let (submission, jobs) =
        SubmissionRepo::create_with_uploads(&pool, &new_submission(1), &all_uploads())
            .await
            .unwrap();
    let old_award_financial = jobs
        .iter()
        .find(|j| j.file_type().unwrap() == FileType::AwardFinancial)
        .unwrap()
        .id;

    let period = UpdateReportingPeriod {
        reporting_start_date: date(2016, 2, 3),
        reporting_end_date: date(2016, 2, 4),
    };
    let (updated, new_jobs) = SubmissionRepo::update_with_uploads(
        &pool,
        submission.id,
        &period,
        &[upload(FileType::AwardFinancial, "updated.csv")],
    )
    .await
    .unwrap()
    .expect("submission exists");

    assert_eq!(updated.id, submission.id);
    assert_eq!(updated.agency_name.as_deref(), Some("Department of the Treasury"));
    assert_eq!(updated.reporting_start_date, date(2016, 2, 3));
    assert_eq!(updated.reporting_end_date, date(2016, 2, 4));
    assert_eq!(new_jobs.len(), 1);

    let old = JobRepo::find_by_id(&pool, old_award_financial).await.unwrap().unwrap();
    assert!(old.superseded_at.is_some());

    let all = JobRepo::list_by_submission(&pool, submission.id).await.unwrap();
    assert_eq!(all.len(), 5, "superseded jobs are kept");
    assert_eq!(all.iter().filter(|j| j.superseded_at.is_none()).count(), 4);

    let current: Vec<_> = all
        .iter()
        .filter(|j| j.superseded_at.is_none())
        .filter(|j| j.file_type().unwrap() == FileType::AwardFinancial)
        .collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, new_jobs[0].id);
    assert_eq!(current[0].job_type().unwrap(), JobType::CsvRecordValidation);
    assert_eq!(current[0].original_filename.as_deref(), Some("updated.csv"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_without_dates_keeps_period(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission(1)).await.unwrap();

    let (updated, jobs) = SubmissionRepo::update_with_uploads(
        &pool,
        submission.id,
        &UpdateReportingPeriod::default(),
        &[],
    )
    .await
    .unwrap()
    .unwrap();

    assert!(jobs.is_empty());
    assert_eq!(updated.reporting_start_date, submission.reporting_start_date);
    assert_eq!(updated.reporting_end_date, submission.reporting_end_date);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_submission_returns_none(pool: PgPool) {
    let result = SubmissionRepo::update_with_uploads(
        &pool,
        999_999,
        &UpdateReportingPeriod::default(),
        &[upload(FileType::Award, "x.csv")],
    )
    .await
    .unwrap();

    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Finalization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_upload_finished_only_from_waiting(pool: PgPool) {
    let (_, jobs) = SubmissionRepo::create_with_uploads(
        &pool,
        &new_submission(1),
        &[upload(FileType::Appropriations, "test1.csv")],
    )
    .await
    .unwrap();
    let job_id = jobs[0].id;

    let first = JobRepo::mark_upload_finished(&pool, job_id).await.unwrap();
    assert_eq!(first.unwrap().status().unwrap(), JobStatus::Ready);

    let second = JobRepo::mark_upload_finished(&pool, job_id).await.unwrap();
    assert!(second.is_none(), "a ready job cannot be finalized twice");
}

// ---------------------------------------------------------------------------
// File status and error data
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_file_status_is_one_per_job(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission(1)).await.unwrap();
    let job = JobRepo::create(&pool, &validation_job(submission.id, FileType::Appropriations))
        .await
        .unwrap();

    let input = CreateFileStatus {
        job_id: job.id,
        filename: "approp.csv".to_string(),
        status: FileStatusKind::Complete,
        missing_headers: vec!["missing_header_one".into(), "missing_header_two".into()],
        duplicated_headers: vec![],
        row_errors_present: true,
    };
    let created = FileStatusRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.missing_headers.len(), 2);

    let found = FileStatusRepo::list_by_jobs(&pool, &[job.id]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);
    assert_eq!(found[0].to_record().unwrap().status, FileStatusKind::Complete);

    let duplicate = FileStatusRepo::create(&pool, &input).await;
    assert!(duplicate.is_err(), "uq_file_status_job_id must reject a second row");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_occurrences_rejected(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission(1)).await.unwrap();
    let job = JobRepo::create(&pool, &validation_job(submission.id, FileType::Award))
        .await
        .unwrap();

    let result = ErrorDataRepo::create(&pool, &error_row(job.id, -1)).await;

    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_total_occurrences_spans_all_jobs(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission(1)).await.unwrap();
    let approp = JobRepo::create(&pool, &validation_job(submission.id, FileType::Appropriations))
        .await
        .unwrap();
    let award = JobRepo::create(&pool, &validation_job(submission.id, FileType::Award))
        .await
        .unwrap();
    ErrorDataRepo::create(&pool, &error_row(approp.id, 7)).await.unwrap();
    ErrorDataRepo::create(&pool, &error_row(approp.id, 5)).await.unwrap();
    ErrorDataRepo::create(&pool, &error_row(award.id, 100)).await.unwrap();

    // A different submission's errors must not leak into the total.
    let other = SubmissionRepo::create(&pool, &new_submission(2)).await.unwrap();
    let other_job = JobRepo::create(&pool, &validation_job(other.id, FileType::Award))
        .await
        .unwrap();
    ErrorDataRepo::create(&pool, &error_row(other_job.id, 1_000)).await.unwrap();

    let job_ids: Vec<i64> = JobRepo::list_by_submission(&pool, submission.id)
        .await
        .unwrap()
        .iter()
        .map(|job| job.id)
        .collect();
    let rows = ErrorDataRepo::list_by_jobs(&pool, &job_ids).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.iter().map(|row| row.occurrences).sum::<i64>(), 112);

    // Cross-check the in-memory sum against the database.
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(e.occurrences), 0)::BIGINT \
         FROM error_data e JOIN jobs j ON j.id = e.job_id \
         WHERE j.submission_id = $1",
    )
    .bind(submission.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(total, 112);

    assert_eq!(rows.iter().filter(|row| row.job_id == approp.id).count(), 2);
    assert!(ErrorDataRepo::list_by_jobs(&pool, &[]).await.unwrap().is_empty());
}
