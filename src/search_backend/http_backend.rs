//! HTTP transport for one search request.

use std::time::Instant;

use anyhow::{Context, Result};

use super::classify::Classification;
use super::extract;
use crate::config::EngineConfig;
use crate::proxy_pool::ProxyEntry;
use crate::stealth::Fingerprint;

pub struct SearchOutcome {
    pub urls: Vec<String>,
    pub has_next_page: bool,
    pub classification: Classification,
    pub latency: std::time::Duration,
    pub status_code: Option<u16>,
}

/// Everything a `SearchBackend` needs that isn't the request itself —
/// kept as a trait so a headless-browser backend can be swapped in
/// without touching the worker pipeline.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(
        &self,
        url: &str,
        proxy: &ProxyEntry,
        fingerprint: Fingerprint,
        cfg: &EngineConfig,
    ) -> Result<SearchOutcome>;
}

pub struct HttpSearchBackend;

#[async_trait::async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(
        &self,
        url: &str,
        proxy: &ProxyEntry,
        fingerprint: Fingerprint,
        cfg: &EngineConfig,
    ) -> Result<SearchOutcome> {
        let proxy_url = proxy.to_url();
        let client = build_client(&proxy_url, cfg)?;

        let mut request = client
            .get(url)
            .header("User-Agent", fingerprint.user_agent)
            .header("Accept", fingerprint.accept)
            .header("Accept-Language", fingerprint.accept_language)
            .header("Accept-Encoding", fingerprint.accept_encoding)
            .header("Connection", "keep-alive");
        if let Some(sec_ch_ua) = fingerprint.sec_ch_ua {
            request = request.header("sec-ch-ua", sec_ch_ua);
        }
        if fingerprint.chromium_extras {
            request = request
                .header("Sec-Fetch-Site", "none")
                .header("Sec-Fetch-Mode", "navigate")
                .header("Sec-Fetch-Dest", "document");
        }

        let started = Instant::now();
        let result = request.send().await;
        let latency = started.elapsed();

        let response = match result {
            Ok(r) => r,
            Err(_) => {
                return Ok(SearchOutcome {
                    urls: Vec::new(),
                    has_next_page: false,
                    classification: Classification::Error,
                    latency,
                    status_code: None,
                });
            }
        };

        let status = response.status().as_u16();
        let own_host = response
            .url()
            .host_str()
            .unwrap_or("www.google.com")
            .to_string();

        let body = match read_bounded_body(response, cfg.max_body_bytes()).await {
            Ok(b) => b,
            Err(_) => {
                return Ok(SearchOutcome {
                    urls: Vec::new(),
                    has_next_page: false,
                    classification: Classification::Error,
                    latency,
                    status_code: Some(status),
                });
            }
        };

        let cap = (cfg.results_per_page() as usize) * 2;
        let extracted = extract::extract(&body, &own_host, cap);
        let classification = super::classify::classify(status, &body, extracted.urls.len());

        Ok(SearchOutcome {
            urls: extracted.urls,
            has_next_page: extracted.has_next_page,
            classification,
            latency,
            status_code: Some(status),
        })
    }
}

fn build_client(proxy_url: &str, cfg: &EngineConfig) -> Result<reqwest::Client> {
    let proxy = reqwest::Proxy::all(proxy_url).context("invalid proxy URL")?;
    reqwest::Client::builder()
        .proxy(proxy)
        .timeout(cfg.request_timeout())
        .redirect(reqwest::redirect::Policy::limited(cfg.max_redirects() as usize))
        .build()
        .context("failed to build HTTP client")
}

async fn read_bounded_body(response: reqwest::Response, max_bytes: usize) -> Result<String> {
    use futures_util::StreamExt;

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("error reading response body")?;
        bytes.extend_from_slice(&chunk);
        if bytes.len() >= max_bytes {
            bytes.truncate(max_bytes);
            break;
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
