//! Request body extraction with validation.

use axum::extract::{FromRequest, Request};
use axum::Json;
use muzer_core::error::CoreError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and passed [`Validate`].
///
/// Malformed JSON, missing fields and failed field rules all surface as
/// `CoreError::Validation` (400 `VALIDATION_ERROR`).
///
/// ```ignore
/// async fn upvote(ValidatedJson(input): ValidatedJson<VoteRequest>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Core(CoreError::Validation(rejection.body_text())))?;

        value
            .validate()
            .map_err(|errors| AppError::Core(CoreError::Validation(errors.to_string())))?;

        Ok(ValidatedJson(value))
    }
}
