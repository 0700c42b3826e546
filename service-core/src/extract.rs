//! Request extractors shared by the HTTP services.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and passed `validator` rules.
///
/// Missing or mistyped fields surface as 422 before the handler runs, so a
/// handler receiving a `ValidatedJson` never has to re-check presence.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_response)?;

        value.validate().map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_response(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            AppError::UnprocessableEntity(err.body_text()).into_response()
        }
        JsonRejection::JsonSyntaxError(err) => {
            AppError::BadRequest(anyhow::anyhow!("Json parse error: {}", err.body_text()))
                .into_response()
        }
        other => (other.status(), other.body_text()).into_response(),
    }
}
