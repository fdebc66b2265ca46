//! Session-based permission gate and the [`AuthUser`] extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use broker_core::roles::is_admin;
use broker_core::types::DbId;

use crate::auth::session::{validate_token, SessionConfig};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The authenticated principal of a request.
///
/// Inserted into request extensions by [`require_login`]; handlers take it as
/// an extractor parameter:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"admin"`, `"agency_user"`).
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        is_admin(&self.role)
    }
}

/// Resolve the principal from an `Authorization: Bearer <token>` header.
fn authenticate(headers: &HeaderMap, config: &SessionConfig) -> Option<AuthUser> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))?;

    let claims = validate_token(token.trim(), config).ok()?;

    Some(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    })
}

/// Reject requests without a valid session before the body is read.
///
/// Responds `401 {"message": "Login Required"}`; otherwise stores the
/// [`AuthUser`] in request extensions and continues.
pub async fn require_login(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let Some(user) = authenticate(request.headers(), &state.config.session) else {
        tracing::debug!(path = %request.uri().path(), "Rejected request without a valid session");
        return Err(AppError::LoginRequired);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        // Routes mounted outside the gate still authenticate on demand.
        authenticate(&parts.headers, &state.config.session).ok_or(AppError::LoginRequired)
    }
}
