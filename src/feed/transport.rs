use std::time::Duration;

use crate::error::{GhStatsError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// GitHub rejects requests that carry no User-Agent.
const USER_AGENT: &str = concat!("gh-stats/", env!("CARGO_PKG_VERSION"));

/// One raw feed response: the body plus the opaque next-page cursor taken
/// from the `Link` response header.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub body: String,
    pub next: Option<String>,
}

/// HTTP transport abstraction for dependency injection.
pub trait Transport {
    /// Performs a GET request, optionally authenticated with a bearer token.
    ///
    /// # Errors
    /// Returns `TransientFetch` for network-level and rate-limit failures,
    /// `HardFetch` for anything the caller cannot retry.
    fn get(&self, url: &str, token: Option<&str>) -> Result<TransportResponse>;
}

/// Production transport using reqwest.
///
/// This implementation cannot be unit tested without a real HTTP server,
/// so it is excluded from coverage measurement.
#[derive(Debug, Default)]
pub struct ReqwestTransport;

#[cfg(not(tarpaulin_include))]
impl Transport for ReqwestTransport {
    fn get(&self, url: &str, token: Option<&str>) -> Result<TransportResponse> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GhStatsError::HardFetch(format!("failed to create HTTP client: {e}")))?;

        let mut request = client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                GhStatsError::TransientFetch(format!("request timeout fetching {url}"))
            } else if e.is_connect() {
                GhStatsError::TransientFetch(format!("failed to connect to {url}"))
            } else {
                GhStatsError::TransientFetch(format!("failed to fetch {url}: {e}"))
            }
        })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(status_error(status, url));
        }

        // Read the header before the body consumes the response.
        let next = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_next_link);

        let body = response.text().map_err(|e| {
            GhStatsError::HardFetch(format!("failed to read response from {url}: {e}"))
        })?;

        Ok(TransportResponse { body, next })
    }
}

/// Maps a non-2xx status to the error taxonomy.
///
/// GitHub serves unauthenticated rate-limit rejections as 403, so 403 and
/// 429 are both retryable; 404 (unknown user) and other client errors are
/// not.
fn status_error(status: u16, url: &str) -> GhStatsError {
    match status {
        403 | 429 => GhStatsError::TransientFetch(format!("HTTP {status} (rate limited) fetching {url}")),
        500..=599 => GhStatsError::TransientFetch(format!("HTTP {status} fetching {url}")),
        _ => GhStatsError::HardFetch(format!("HTTP {status} fetching {url}")),
    }
}

/// Extracts the `rel="next"` target from a `Link` header value.
///
/// GitHub's header looks like:
/// `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`
fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| param.trim() == "rel=\"next\"");
        (is_next && target.starts_with('<') && target.ends_with('>'))
            .then(|| target[1..target.len() - 1].to_string())
    })
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
