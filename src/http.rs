//! Shared response-to-error mapping for the API client and the identity
//! backends.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub(crate) fn status_error(status: StatusCode, message: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

pub(crate) async fn json_or_error<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(status_error(status, message))
    }
}

pub(crate) async fn unit_or_error(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(status_error(status, message))
    }
}
