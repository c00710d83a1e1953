//! HTTP client for the generation service.

use crate::model::{ExportConfig, GenerateRequest, TimeEntry};
use anyhow::{anyhow, Context, Result};
use bytes::Bytes;

/// Thin wrapper around a reqwest client pinned to one service base URL.
pub struct GenerateClient {
    http: reqwest::Client,
    base_url: String,
}

impl GenerateClient {
    pub fn new(cfg: &ExportConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST the ordered entries and return the response body as-is.
    ///
    /// Any 2xx body is the file content, whatever its content type claims.
    /// Everything else is a generation failure; the body is not parsed for
    /// diagnostics.
    pub async fn generate(&self, times: &[TimeEntry]) -> Result<Bytes> {
        let url = format!("{}/generate", self.base_url);
        let body = GenerateRequest {
            times: times.to_vec(),
        };
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        if !resp.status().is_success() {
            return Err(anyhow!("generation service returned {}", resp.status()));
        }
        resp.bytes().await.context("read generated payload")
    }
}
