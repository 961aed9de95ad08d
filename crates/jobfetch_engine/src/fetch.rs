use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// A current desktop Chrome on macOS; some job boards serve bots a stub page.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Value of the `Accept` request header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    Html,
    Json,
}

impl Accept {
    pub fn header_value(self) -> &'static str {
        match self {
            Accept::Html => "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            Accept::Json => "application/json, */*",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 10,
            max_bytes: 10 * 1024 * 1024,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// One GET, no retries.
    async fn fetch(&self, url: &str, accept: Accept) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn build_client(&self, redirect_counter: Arc<AtomicUsize>) -> Result<reqwest::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count > redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }
}

/// Parse `url` and require an `http`/`https` scheme.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim())
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{url}: {err}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("unsupported scheme '{scheme}' (only http and https)"),
            ));
        }
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::new(FailureKind::InvalidUrl, format!("{url}: missing host")));
    }
    Ok(parsed)
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, accept: Accept) -> Result<FetchOutput, FetchError> {
        let parsed = validate_url(url)?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        engine_info!("GET {} (accept {:?})", parsed, accept);
        let response = client
            .get(parsed)
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .header(ACCEPT, accept.header_value())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url: final_url.to_string(),
            host: final_url.host_str().unwrap_or_default().to_ascii_lowercase(),
            path: final_url.path().to_string(),
            content_type,
            redirect_count: redirect_counter.load(Ordering::Relaxed),
            byte_len: bytes.len() as u64,
        };
        engine_debug!(
            "{} {} bytes from {} after {} redirect(s)",
            status,
            metadata.byte_len,
            metadata.host,
            metadata.redirect_count
        );

        Ok(FetchOutput { bytes, metadata })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_headers_match_document_kind() {
        assert!(Accept::Html.header_value().starts_with("text/html"));
        assert_eq!(Accept::Json.header_value(), "application/json, */*");
    }

    #[test]
    fn only_http_schemes_are_accepted() {
        assert!(validate_url("https://example.com/job").is_ok());
        assert!(validate_url("http://example.com").is_ok());

        let err = validate_url("ftp://example.com/file").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
        assert!(err.message.contains("ftp"));

        let err = validate_url("example.com/job").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
