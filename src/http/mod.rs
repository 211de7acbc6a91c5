//! HTTP client module with status classification and optional retries.

mod client;
mod retry;

pub use client::HttpClient;
pub use retry::{
    DEFAULT_ATTEMPTS, RETRY_DELAY_MS, RequestError, check_response, check_retryable,
    classify_error,
};
