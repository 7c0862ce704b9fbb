use super::{HttpClient, HttpRequest, HttpResponse};
use crate::config::Config;
use crate::error::{Result, ScrapeError};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::debug;

pub struct ReqwestClient {
    client: reqwest::Client,
    api_headers: HeaderMap,
}

impl ReqwestClient {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let mut api_headers = HeaderMap::new();
        for (k, v) in &cfg.api.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| anyhow!("invalid header name {k:?}: {e}"))?;
            let value = HeaderValue::from_str(v)
                .map_err(|e| anyhow!("invalid header value for {k}: {e}"))?;
            api_headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(cfg.api.max_redirects));
        if cfg.api.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(cfg.api.timeout_seconds));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_headers,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, req: &HttpRequest) -> Result<HttpResponse> {
        debug!(url = %req.url, query = ?req.query, "GET");
        let transport = |e: reqwest::Error| ScrapeError::Transport {
            url: req.url.clone(),
            message: e.to_string(),
        };

        let mut builder = self.client.get(&req.url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if req.api_headers {
            builder = builder.headers(self.api_headers.clone());
        }

        let resp = builder.send().await.map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(transport)?;
        Ok(HttpResponse { status, body })
    }
}
