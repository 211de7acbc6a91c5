//! Status classification and retry settings for remote fetches.

use reqwest::{Response, StatusCode};

/// Default number of attempts per request. One attempt means no retries.
pub const DEFAULT_ATTEMPTS: usize = 1;

/// Delay between retry attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Request failures that another attempt will not fix.
#[derive(Debug)]
pub enum RequestError {
    /// Rate limit exceeded (HTTP 403 with rate limit message or 429)
    RateLimitExceeded(String),
    /// Authentication failed (HTTP 401)
    AuthenticationFailed(String),
    /// Resource not found (HTTP 404)
    NotFound(String),
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden(String),
    /// Other 4xx responses
    ClientError(String),
}

impl RequestError {
    /// Failures that a credential could change.
    pub fn is_auth_related(&self) -> bool {
        matches!(
            self,
            RequestError::RateLimitExceeded(_) | RequestError::AuthenticationFailed(_)
        )
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::RateLimitExceeded(msg) => {
                write!(f, "Rate limit exceeded: {}. Try again later.", msg)
            }
            RequestError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}", msg)
            }
            RequestError::NotFound(msg) => write!(f, "Not found: {}", msg),
            RequestError::Forbidden(msg) => write!(f, "Access forbidden: {}", msg),
            RequestError::ClientError(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

/// Returns `Ok(())` for failures worth retrying (transport errors, 5xx),
/// or the matching [`RequestError`] otherwise.
///
/// Only the status is available here, so a 403 is always [`RequestError::Forbidden`];
/// [`check_response`] tells rate-limited 403s apart.
pub fn classify_error(error: &reqwest::Error) -> Result<(), RequestError> {
    let Some(status) = error.status() else {
        return Ok(());
    };

    match status {
        StatusCode::UNAUTHORIZED => Err(RequestError::AuthenticationFailed(
            "Invalid or missing authentication token".to_string(),
        )),
        StatusCode::FORBIDDEN => Err(RequestError::Forbidden(
            "Access to this resource is forbidden".to_string(),
        )),
        StatusCode::TOO_MANY_REQUESTS => Err(RequestError::RateLimitExceeded(
            "Too many requests".to_string(),
        )),
        StatusCode::NOT_FOUND => Err(RequestError::NotFound(
            "The requested resource was not found".to_string(),
        )),
        s if s.is_client_error() => Err(RequestError::ClientError(format!(
            "HTTP {} error",
            s.as_u16()
        ))),
        _ => Ok(()),
    }
}

/// Converts an `error_for_status()` failure into an `anyhow::Error`,
/// replacing non-retryable statuses with a [`RequestError`].
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Ok(()) => anyhow::Error::from(error),
        Err(request_error) => anyhow::Error::from(request_error),
    }
}

/// Passes successful responses through and turns the rest into errors.
///
/// A 403 counts as rate limiting when `x-ratelimit-remaining` is `0` or the
/// body mentions a rate limit, which is how the GitHub API reports it.
pub async fn check_response(response: Response) -> anyhow::Result<Response> {
    let error = response.error_for_status_ref().err();
    let Some(error) = error else {
        return Ok(response);
    };

    if response.status() == StatusCode::FORBIDDEN {
        let exhausted = response
            .headers()
            .get(RATE_LIMIT_REMAINING)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|remaining| remaining.trim() == "0");
        let body = response.text().await.unwrap_or_default();
        if exhausted || body.to_lowercase().contains("rate limit") {
            return Err(anyhow::Error::from(RequestError::RateLimitExceeded(
                "API rate limit exceeded".to_string(),
            )));
        }
    }

    Err(check_retryable(error))
}
