//! Request extraction with structured validation errors.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use super::handlers::ApiError;

/// Json extractor whose rejection is a structured error body.
///
/// Schema violations (missing fields, wrong types, malformed JSON) are
/// turned into the same `{error, detail}` shape the rest of the API speaks,
/// before any handler logic runs.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::Validation {
                status: rejection.status(),
                detail: rejection.body_text(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn validation_rejection_is_a_client_error() {
        let response = ApiError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "missing field `client_name`".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
