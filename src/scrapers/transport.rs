//! HTTP transport with a fixed deadline, anti-bot header mimicry and
//! optional request/response tracing.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, HOST, ORIGIN, REFERER, SET_COOKIE, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::error::{Result, ScrapeError};

/// Every call fails rather than hang past this bound.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Origin the remote service expects to see on browser traffic.
pub const SITE_ORIGIN: &str = "https://www.seloger.com";

/// The site inspects the user agent for bot detection, so a realistic
/// desktop browser string is sent on every request.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:86.0) Gecko/20100101 Firefox/86.0";

/// A fully buffered HTTP response.
///
/// Status codes are not interpreted here; that is the caller's job.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    /// Value of the `Set-Cookie` header whose cookie name matches `name`
    /// exactly (case-sensitive). Attributes after the first `;` are ignored.
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .find(|(n, _)| n.trim() == name)
            .map(|(_, value)| value.trim().to_string())
    }
}

/// Issues HTTP requests under a fixed deadline.
///
/// Holds no per-call state; one `Transport` may be shared across
/// concurrent operations. Tracing is an explicit construction-time flag,
/// never enabled by default: dumps include full headers and bodies, so
/// credentials would leak into logs.
pub struct Transport {
    client: Client,
    trace: bool,
}

impl Transport {
    pub fn new(trace: bool) -> Result<Self> {
        Self::with_timeout(trace, REQUEST_TIMEOUT)
    }

    /// Create a transport with a custom deadline. The bound covers the
    /// whole exchange, body read included.
    pub fn with_timeout(trace: bool, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, trace })
    }

    pub fn get(&self, url: &Url) -> RequestBuilder {
        self.client.get(url.clone())
    }

    pub fn post(&self, url: &Url) -> RequestBuilder {
        self.client.post(url.clone())
    }

    /// Send a request, buffering the full response body.
    ///
    /// Cancellation through `cancel` aborts the in-flight exchange and
    /// surfaces as `ScrapeError::Cancelled`, distinct from a deadline
    /// expiry which arrives as `ScrapeError::Transport`.
    pub async fn send(&self, request: RequestBuilder, cancel: &CancellationToken) -> Result<Response> {
        let request = request.build()?;

        if self.trace {
            let body = request
                .body()
                .and_then(|b| b.as_bytes())
                .map(String::from_utf8_lossy)
                .unwrap_or_default();
            debug!(
                method = %request.method(),
                url = %request.url(),
                headers = ?request.headers(),
                body = %body,
                "outbound request"
            );
        }

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ScrapeError::Cancelled),
            res = async {
                let resp = self.client.execute(request).await?;
                let status = resp.status();
                let headers = resp.headers().clone();
                let body = resp.bytes().await?.to_vec();
                Ok::<_, reqwest::Error>(Response { status, headers, body })
            } => res?,
        };

        if self.trace {
            debug!(
                status = %response.status,
                headers = ?response.headers,
                body = %String::from_utf8_lossy(&response.body),
                "inbound response"
            );
        }

        Ok(response)
    }
}

/// Headers mimicked on every request to reduce anti-bot rejection.
/// Fixed constants of the target site's expectations, not user-configurable.
pub fn common_headers(target: &Url) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(host) = target.host_str() {
        let host = match target.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        if let Ok(value) = HeaderValue::from_str(&host) {
            headers.insert(HOST, value);
        }
    }
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static("https://www.seloger.com/"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers
}
