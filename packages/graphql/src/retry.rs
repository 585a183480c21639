//! HTTP retry helpers for transient errors.
//!
//! Operations go through [`send_json`] rather than calling
//! `reqwest::blocking::RequestBuilder::send()` directly, so every request
//! gets exponential backoff on timeouts, connection failures, rate limiting
//! and server errors.
//!
//! ```ignore
//! let body = retry::send_json(|| client.post(&url).json(&payload), 3)?;
//! ```

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{RequestBuilder, Response};

use crate::SinkError;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Sends a request and parses the response body as JSON.
///
/// `build_request` is called once per attempt since builders are consumed
/// by `send()`.
///
/// # Errors
///
/// Returns [`SinkError`] if the request still fails after `max_retries`
/// retries, the server answers with a non-retryable status, or the body is
/// not JSON.
pub fn send_json<F>(build_request: F, max_retries: u32) -> Result<serde_json::Value, SinkError>
where
    F: Fn() -> RequestBuilder,
{
    let response = send_inner(&build_request, max_retries)?;
    let url = response.url().to_string();
    let status = response.status();
    let text = response.text()?;

    serde_json::from_str(&text).map_err(|e| {
        log::error!(
            "JSON parse failed\n  \
             url: {url}\n  \
             status: {status}\n  \
             received: {} bytes\n  \
             parse error: {e}\n  \
             body preview: {}",
            text.len(),
            preview(&text),
        );
        SinkError::Json(e)
    })
}

fn preview(text: &str) -> String {
    if text.len() > BODY_PREVIEW_LEN {
        let cut = (0..=BODY_PREVIEW_LEN)
            .rev()
            .find(|idx| text.is_char_boundary(*idx))
            .unwrap_or(0);
        format!("{}...", &text[..cut])
    } else {
        text.to_owned()
    }
}

/// Delay before the given retry attempt: 2s, 4s, 8s, ...
#[must_use]
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(16))
}

fn send_inner<F>(build_request: &F, max_retries: u32) -> Result<Response, SinkError>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;
    loop {
        if attempt > 0 {
            let delay = backoff_delay(attempt);
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            std::thread::sleep(delay);
        }
        let can_retry = attempt < max_retries;
        attempt += 1;

        let response = match build_request().send() {
            Ok(response) => response,
            Err(e) if is_transient(&e) && can_retry => {
                log::warn!("  transient error: {e}");
                continue;
            }
            Err(e) => return Err(SinkError::Http(e)),
        };

        let status = response.status();
        match classify_status(status) {
            StatusClass::Success => return Ok(response),
            StatusClass::Retryable if can_retry => {
                log::warn!("  HTTP {status}");
            }
            StatusClass::Retryable => {
                return Err(SinkError::Status {
                    status: format!("{status} after {max_retries} retries"),
                });
            }
            StatusClass::Permanent => {
                return Err(SinkError::Status {
                    status: status.to_string(),
                });
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Success,
    Retryable,
    Permanent,
}

/// 429 and 5xx are retried; any other 4xx is permanent.
fn classify_status(status: StatusCode) -> StatusClass {
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        StatusClass::Retryable
    } else if status.is_client_error() {
        StatusClass::Permanent
    } else {
        StatusClass::Success
    }
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
