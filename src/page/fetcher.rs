use std::error::Error as _;
use std::future::Future;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::Instrument;

/// What a completed request handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// A 200 response and its body.
    Page(String),
    /// Any other status. Nothing to extract from.
    Status(u16),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("{url}: {reason}")]
    Transport { url: String, reason: String },
}

impl FetchError {
    pub fn transport(url: &str, reason: impl Into<String>) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Names the failure kind and walks the source chain down to the root cause.
fn describe(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    let mut reason = format!("{} ({})", kind, err);
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}

pub trait PageFetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Fetched, FetchError>> + Send;
}

impl PageFetcher for reqwest::Client {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Fetched, FetchError>> + Send {
        async move {
            let resp = match self.get(url).send().await {
                Ok(resp) => resp,
                Err(err) => {
                    let reason = describe(&err);
                    tracing::error!("{}", reason);
                    return Err(FetchError::transport(url, reason));
                }
            };
            let status = resp.status();
            if status != StatusCode::OK {
                tracing::debug!("Non-success status {}", status);
                return Ok(Fetched::Status(status.as_u16()));
            }
            match resp.text().await {
                Ok(body) => Ok(Fetched::Page(body)),
                Err(err) => {
                    let reason = describe(&err);
                    tracing::error!("{}", reason);
                    Err(FetchError::transport(url, reason))
                }
            }
        }
        .instrument(tracing::debug_span!("fetch", url = url))
    }
}
