pub mod health;

use axum::routing::{post, MethodRouter};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Every route answers with and without a trailing slash:
///
/// ```text
/// /submit_files/                 create or update a submission (POST)
/// /finalize_job/                 mark an upload complete (POST)
/// /check_status/                 submission status (POST)
/// /submission_error_reports/     error report locations (POST)
/// /error_metrics/                per-file-type error metrics (POST)
/// ```
///
/// The permission gate is applied by the caller so the tree stays
/// state-free.
pub fn api_routes() -> Router<AppState> {
    let routes: [(&str, MethodRouter<AppState>); 5] = [
        ("/submit_files", post(handlers::submission::submit_files)),
        ("/finalize_job", post(handlers::submission::finalize_job)),
        ("/check_status", post(handlers::status::check_status)),
        (
            "/submission_error_reports",
            post(handlers::reports::submission_error_reports),
        ),
        (
            "/error_metrics",
            post(handlers::metrics::submission_error_metrics),
        ),
    ];

    routes
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router
                .route(path, method_router.clone())
                .route(&format!("{path}/"), method_router)
        })
}
