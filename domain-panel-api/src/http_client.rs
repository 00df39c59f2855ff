//! Shared HTTP plumbing.
//!
//! Sending, logging and the retry loop live here; turning a status code into a
//! typed error is left to [`ApiErrorMapper`](crate::traits::ApiErrorMapper).

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ApiError;
use crate::utils::log_sanitizer::{sanitize_body, truncate_for_log};

/// Longest `Retry-After` the client is willing to honour.
const MAX_RETRY_AFTER_SECS: u64 = 30;

/// HTTP helper functions
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return `(status_code, response_text)`.
    ///
    /// Transport failures, HTTP 429 and gateway errors (502/503/504) are turned
    /// into retryable [`ApiError`]s here; every other status is handed back to
    /// the caller.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!("{method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("{method_name} {path} -> {status_code}");

        // Read before the body consumes the response.
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{method_name} {path}: rate limited, retry_after={retry_after:?}");
            return Err(ApiError::RateLimited {
                retry_after,
                raw_message: (!body.is_empty()).then(|| truncate_for_log(&body)),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{method_name} {path}: gateway error (HTTP {status_code})");
            return Err(ApiError::Gateway {
                status: status_code,
                raw_message: (!body.is_empty()).then(|| truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("Response Body: {}", sanitize_body(&response_text));

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("{path}: JSON parse failed: {e}");
            log::error!("{path}: raw response: {}", sanitize_body(response_text));
            ApiError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// Like [`execute_request`](Self::execute_request), retrying transient failures.
    ///
    /// Only use this for idempotent requests. `max_retries` counts extra attempts,
    /// so 0 sends the request exactly once.
    ///
    /// Delays: `Retry-After` (capped at 30s) for 429, otherwise exponential backoff
    /// of 100ms, 200ms, 400ms, ... up to 10s.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ApiError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method_name, path).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use.
            let Some(req) = request_builder.try_clone() else {
                log::warn!("{method_name} {path}: request body is not cloneable, sending once");
                return Self::execute_request(request_builder, method_name, path).await;
            };

            match Self::execute_request(req, method_name, path).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "{} {}: attempt {}/{} failed, retrying in {:.1}s: {}",
                        method_name,
                        path,
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

fn retry_delay(error: &ApiError, attempt: u32) -> Duration {
    if let ApiError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms * 2^attempt, at most 10s.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
