//! Request body extraction.

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor whose rejections render as [`AppError`].
///
/// A missing field, a wrongly typed field or an unparsable body becomes a
/// 400 `VALIDATION_ERROR` with a JSON `message`, like every other failure.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
