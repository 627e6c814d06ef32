//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use muzer_core::error::CoreError;
use muzer_core::types::DbId;
use muzer_db::models::user::CreateUser;
use muzer_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Provider recorded on users provisioned from a token.
pub const IDENTITY_PROVIDER: &str = "google";

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token's `email` is resolved to a `users` row, which is created on the
/// caller's first request. This is the only source of caller identity:
/// handlers pass `user_id` explicitly into every ledger call.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id, looked up by `claims.email`.
    pub user_id: DbId,
    /// The user's email (from `claims.email`).
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthenticated(
                "Invalid or expired token".into(),
            ))
        })?;

        let email = claims.email.trim();
        if email.is_empty() {
            return Err(AppError::Core(CoreError::Unauthenticated(
                "Token carries no email".into(),
            )));
        }

        let user = UserRepo::find_or_create_by_email(
            &state.pool,
            &CreateUser {
                email: email.to_string(),
                provider: IDENTITY_PROVIDER.to_string(),
            },
        )
        .await?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
        })
    }
}
