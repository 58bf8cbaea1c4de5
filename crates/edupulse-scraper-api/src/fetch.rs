//! Resilient HTTP fetching shared by every scraper.

use std::time::{
    Duration,
    Instant,
};

use reqwest::header::{
    HeaderMap,
    HeaderValue,
    ACCEPT,
    ACCEPT_LANGUAGE,
    CONNECTION,
    CONTENT_TYPE,
    UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use reqwest::{
    Client,
    Response,
    Url,
};

use crate::error::{
    ScraperError,
    ScraperResult,
};

/// Content types the admission offices label spreadsheet exports with.
/// Mislabeling happens, so a mismatch is logged rather than rejected.
const SPREADSHEET_CONTENT_TYPES: [&str; 3] = [
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/octet-stream",
];

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Total per-request timeout.
    pub total_timeout: Duration,
    pub connect_timeout: Duration,
    /// Retries after the first attempt; 3 means up to 4 requests.
    pub max_retries: u32,
    /// Base backoff delay; attempt n waits `retry_delay * 2^(n-1)`.
    pub retry_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            total_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// HTTP client with built-in timeouts, retries, and error classification.
///
/// Client errors (4xx) signal a permanent condition and are surfaced
/// immediately; timeouts, connection failures, and 5xx responses are
/// retried with exponential backoff until `max_retries` is exhausted,
/// after which the last error is returned.
pub struct FetchClient {
    client: Client,
    config: FetchConfig,
}

impl FetchClient {
    pub fn new() -> ScraperResult<Self> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> ScraperResult<Self> {
        let client = Client::builder()
            .timeout(config.total_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ScraperError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// GET returning the response body as text.
    pub async fn get_text(&self, url: &str) -> ScraperResult<String> {
        let response = self.get_with_retries(url, None).await?;
        response
            .text()
            .await
            .map_err(|e| ScraperError::Download(format!("failed to read body from {url}: {e}")))
    }

    /// GET with a browser-like header set; ranking pages block obvious
    /// non-browser clients.
    pub async fn get_text_with_browser_headers(&self, url: &str) -> ScraperResult<String> {
        let response = self.get_with_retries(url, Some(browser_headers())).await?;
        response
            .text()
            .await
            .map_err(|e| ScraperError::Download(format!("failed to read body from {url}: {e}")))
    }

    /// Download a spreadsheet export as raw bytes, validating (but not
    /// enforcing) the declared content type.
    pub async fn download_spreadsheet(&self, url: &str) -> ScraperResult<Vec<u8>> {
        let response = self.get_with_retries(url, None).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if !content_type_is_spreadsheet(&content_type) {
            tracing::warn!(
                content_type = %content_type,
                url = %url,
                "Unexpected content type for spreadsheet download"
            );
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScraperError::Download(format!("failed to read body from {url}: {e}")))?;

        tracing::info!(bytes = bytes.len(), host = %host_of(url), "Downloaded spreadsheet");
        Ok(bytes.to_vec())
    }

    async fn get_with_retries(
        &self, url: &str, headers: Option<HeaderMap>,
    ) -> ScraperResult<Response> {
        let host = host_of(url);
        let started = Instant::now();
        let mut last_error = ScraperError::Network(format!("no request attempted for {url}"));

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.config.retry_delay, attempt);
                tracing::warn!(
                    host = %host,
                    attempt,
                    max_retries = self.config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying request after backoff"
                );
                tokio::time::sleep(delay).await;
            }

            tracing::debug!(host = %host, attempt = attempt + 1, "GET");

            let mut request = self.client.get(url);
            if let Some(ref headers) = headers {
                request = request.headers(headers.clone());
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        if attempt > 0 {
                            tracing::info!(
                                host = %host,
                                attempt,
                                elapsed_ms = started.elapsed().as_millis() as u64,
                                "Request succeeded on retry"
                            );
                        }
                        return Ok(response);
                    }

                    if status.is_client_error() {
                        tracing::error!(
                            host = %host,
                            status = status.as_u16(),
                            "Client error, not retrying"
                        );
                        return Err(ScraperError::Status {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }

                    tracing::warn!(
                        host = %host,
                        status = status.as_u16(),
                        attempt = attempt + 1,
                        "Server error"
                    );
                    last_error = ScraperError::Status {
                        status: status.as_u16(),
                        url: url.to_string(),
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        host = %host,
                        attempt = attempt + 1,
                        timeout = e.is_timeout(),
                        connect = e.is_connect(),
                        error = %e,
                        "Request failed"
                    );
                    last_error = ScraperError::Network(e.to_string());
                }
            }
        }

        tracing::error!(
            host = %host,
            attempts = self.config.max_retries + 1,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "All attempts failed"
        );
        Err(last_error)
    }
}

/// Header set matching a mainstream desktop browser.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ru-RU,ru;q=0.8,en-US;q=0.5,en;q=0.3"),
    );
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

fn content_type_is_spreadsheet(content_type: &str) -> bool {
    SPREADSHEET_CONTENT_TYPES
        .iter()
        .any(|expected| content_type.contains(expected))
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt.saturating_sub(1))
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| url.to_string())
}
