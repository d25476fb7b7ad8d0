//! HTTP retry helpers for transient errors.
//!
//! Provider clients call [`send_json`] instead of
//! `reqwest::RequestBuilder::send()` directly, so every request gets a
//! short retry with exponential backoff on connection failures, HTTP 429
//! and HTTP 5xx.
//!
//! Retries are deliberately few: the caller wraps the whole fetch in the
//! service timeout (see [`crate::resilient`]), and a slow source is
//! replaced by synthetic data rather than waited on.
//!
//! ```ignore
//! let body = retry::send_json(|| client.get(&url).query(&params)).await?;
//! ```

use std::time::Duration;

use crate::SourceError;

/// Maximum number of retries after the first attempt.
const MAX_RETRIES: u32 = 2;

/// Backoff before the first retry; doubled on each following attempt.
const BASE_DELAY: Duration = Duration::from_millis(250);

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 300;

/// Sends an HTTP request and parses the response body as JSON.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails after all retries, the
/// server returns a non-retryable status, or the body is not valid JSON.
pub async fn send_json<F>(build_request: F) -> Result<serde_json::Value, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let response = send_inner(&build_request, MAX_RETRIES).await?;
    let url = response.url().to_string();
    let status = response.status();
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|e| {
        log::warn!(
            "JSON parse failed\n  \
             url: {url}\n  \
             status: {status}\n  \
             received: {} bytes\n  \
             parse error: {e}\n  \
             body preview: {}",
            text.len(),
            preview(&text),
        );
        SourceError::Json(e)
    })
}

/// Core retry loop.
///
/// Returns the successful [`reqwest::Response`] (status 2xx or 3xx).
async fn send_inner<F>(
    build_request: &F,
    max_retries: u32,
) -> Result<reqwest::Response, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = BASE_DELAY * 2u32.pow(attempt - 1);
            log::debug!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < max_retries {
                    log::debug!("  transient error: {e}");
                    attempt += 1;
                    continue;
                }
                return Err(SourceError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                // 429 and 5xx are worth another try; other 4xx are permanent.
                let retryable = status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error();
                if retryable && attempt < max_retries {
                    log::debug!("  HTTP {status} from {}", response.url());
                    attempt += 1;
                    continue;
                }
                if status.is_client_error() || status.is_server_error() {
                    return Err(SourceError::Status {
                        status: status.as_u16(),
                        url: response.url().to_string(),
                    });
                }

                return Ok(response);
            }
        }
    }
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request()
}

fn preview(text: &str) -> String {
    if text.len() > BODY_PREVIEW_LEN {
        let end = (0..=BODY_PREVIEW_LEN)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    }
}
