//! Plumbing shared by Wikipedia, Crossref and Fact Check: one `reqwest`
//! client, the status check every reply goes through, and cleanup of the
//! markup those APIs put in titles and snippets.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::SourceError;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));

/// Build the shared `reqwest` client.
///
/// `timeout` bounds each request on the transport level; the retriever applies
/// its own per-source timeout on top.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the TLS backend cannot be initialized.
pub fn client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("credo/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?)
}

/// Wait assumed when a source rate-limits without a usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Pass a source's response through only if it carries evidence to parse.
///
/// A 429 becomes [`SourceError::RateLimited`] so the retriever logs how long
/// the source asked it to back off. Any other non-2xx status becomes
/// [`SourceError::Api`] carrying the body the source sent back.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited {
            retry_after_secs: retry_after_secs(&resp),
        });
    }
    if status.is_success() {
        return Ok(resp);
    }
    Err(SourceError::Api {
        status: status.as_u16(),
        message: resp.text().await.unwrap_or_default(),
    })
}

/// `Retry-After` in whole seconds; HTTP dates are not honored.
fn retry_after_secs(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Remove HTML/JATS tags and decode the handful of entities APIs emit.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let stripped = TAG_RE.replace_all(text, " ");
    stripped
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, retry_after: Option<&str>) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body("quota exhausted").unwrap())
    }

    #[tokio::test]
    async fn rate_limited_source_reports_its_backoff() {
        let err = check_response(reply(429, Some("120"))).await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::RateLimited {
                retry_after_secs: 120
            }
        ));
    }

    #[tokio::test]
    async fn unusable_backoff_falls_back_to_a_minute() {
        for header in [None, Some("soon"), Some("Wed, 21 Oct 2026 07:28:00 GMT")] {
            let err = check_response(reply(429, header)).await.unwrap_err();
            assert!(
                matches!(err, SourceError::RateLimited { retry_after_secs: 60 }),
                "header {header:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn failing_source_keeps_status_and_body() {
        let err = check_response(reply(503, None)).await.unwrap_err();
        match err {
            SourceError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "quota exhausted");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_reply_passes_through() {
        let resp = check_response(reply(200, None)).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn strip_markup_removes_tags_and_entities() {
        assert_eq!(
            strip_markup(r#"The <span class="searchmatch">WHO</span> &quot;report&quot; &amp; data"#),
            r#"The WHO "report" & data"#
        );
        assert_eq!(
            strip_markup("<jats:p>Accuracy was 62%.</jats:p>"),
            "Accuracy was 62%."
        );
    }
}
