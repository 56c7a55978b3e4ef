//! Remote image download with a proxy fallback chain.
//!
//! Hosts often refuse hotlinked or cross-origin requests, so a URL is tried
//! directly first and then through each configured proxy template in order.
//! A template carries a `{url}` placeholder that receives the percent-encoded
//! target, e.g. `https://corsproxy.io/?{url}`. The first attempt that returns
//! a 2xx status with a non-empty body wins.

use super::decoder::DecodeError;
use crate::config::FetchConfig;
use log::{debug, warn};
use std::io::Read;
use std::time::Duration;

/// Placeholder substituted in proxy templates.
pub const URL_PLACEHOLDER: &str = "{url}";

/// Upper bound on a downloaded body, to keep a bad URL from exhausting memory.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

pub struct Fetcher {
    agent: ureq::Agent,
    proxies: Vec<String>,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            proxies: config.proxies.clone(),
        }
    }

    /// Download `url`, walking the fallback chain until one attempt succeeds.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, DecodeError> {
        url::Url::parse(url).map_err(|e| DecodeError::Fetch {
            url: url.to_string(),
            reason: format!("invalid URL: {e}"),
        })?;

        let mut failures = Vec::new();
        for (attempt, candidate) in candidate_urls(url, &self.proxies).iter().enumerate() {
            debug!("fetch attempt {} for {url}: {candidate}", attempt + 1);
            match self.fetch_once(candidate) {
                Ok(bytes) => return Ok(bytes),
                Err(reason) => {
                    warn!("fetch via {candidate} failed: {reason}");
                    failures.push(format!("{candidate}: {reason}"));
                }
            }
        }

        Err(DecodeError::Fetch {
            url: url.to_string(),
            reason: failures.join("; "),
        })
    }

    fn fetch_once(&self, candidate: &str) -> Result<Vec<u8>, String> {
        let response = self.agent.get(candidate).call().map_err(|e| e.to_string())?;
        read_body(response.into_reader(), MAX_BODY_BYTES)
    }
}

/// Read a whole response body. Empty bodies and bodies over `limit` bytes
/// are failed attempts, never truncated successes.
fn read_body(reader: impl Read, limit: u64) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    reader
        .take(limit + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| e.to_string())?;
    if bytes.len() as u64 > limit {
        return Err(format!("response body exceeds {} MiB", limit / (1024 * 1024)));
    }
    if bytes.is_empty() {
        return Err("empty response body".to_string());
    }
    Ok(bytes)
}

/// The direct URL followed by every proxy template with the URL filled in.
pub fn candidate_urls(url: &str, proxies: &[String]) -> Vec<String> {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    std::iter::once(url.to_string())
        .chain(
            proxies
                .iter()
                .map(|template| template.replace(URL_PLACEHOLDER, &encoded)),
        )
        .collect()
}
