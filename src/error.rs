use thiserror::Error;

/// Errors surfaced while decoding a bearer token locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("token is not a three-segment JWT")]
    MalformedToken,
    #[error("token payload is not valid JSON: {0}")]
    InvalidPayload(String),
}

/// Error taxonomy for API calls and auth operations.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("cannot reach server: {0}")]
    NetworkUnavailable(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid response: {0}")]
    Parse(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("identity provider profile unavailable: {0}")]
    ProfileUnavailable(String),
    #[error("no refresh token available")]
    NoRefreshToken,
    #[error("refresh token rejected")]
    RefreshRejected,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::NetworkUnavailable(err.to_string())
    }
}

impl ApiError {
    /// Message suitable for direct display in a view.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::NetworkUnavailable(_) => "Cannot reach the server",
            ApiError::Unauthorized => "Invalid credentials",
            ApiError::Forbidden => "Access denied",
            ApiError::NotFound(_) => "Resource not found",
            ApiError::Conflict(_) => "An account with this email already exists",
            ApiError::NoRefreshToken | ApiError::RefreshRejected => {
                "Your session has expired, please sign in again"
            }
            _ => "Something went wrong, please try again",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reqwest_errors_map_to_network_unavailable() {
        // grab an ephemeral port and release it so nothing listens there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::Client::new()
            .get(format!("http://{addr}/"))
            .send()
            .await
            .unwrap_err();

        let api: ApiError = err.into();
        assert!(matches!(api, ApiError::NetworkUnavailable(_)));
        assert_eq!(api.user_message(), "Cannot reach the server");
    }

    #[test]
    fn conflict_maps_to_duplicate_account_message() {
        let err = ApiError::Conflict("email taken".into());
        assert_eq!(err.user_message(), "An account with this email already exists");
    }

    #[test]
    fn refresh_failures_map_to_session_expired() {
        assert_eq!(
            ApiError::RefreshRejected.user_message(),
            ApiError::NoRefreshToken.user_message()
        );
    }
}
