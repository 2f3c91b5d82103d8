pub mod cache;

use chrono::Utc;
use reqwest::Client;

use crate::config::FetchConfig;
use crate::error::{AppError, Result};
use cache::ResponseCache;

const USER_AGENT: &str = concat!("barometer/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the upstream JSON APIs with a filesystem response cache.
///
/// Only successful responses are cached; a non-2xx status surfaces as
/// [`AppError::UpstreamStatus`] so sources can separate expected absence
/// (404 at a known endpoint) from genuine failure.
pub struct CachedClient {
    client: Client,
    cache: ResponseCache,
}

impl CachedClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            cache: ResponseCache::new(&config.cache_dir, config.cache_max_age_secs),
        })
    }

    pub async fn get_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
    ) -> Result<serde_json::Value> {
        if let Some(body) = self.cache.lookup(url, Utc::now()) {
            tracing::debug!(%url, "response cache hit");
            return Ok(body);
        }

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.json::<serde_json::Value>().await?;
        if let Err(e) = self.cache.store(url, &body, Utc::now()) {
            tracing::warn!(%url, error = %e, "failed to write cache entry");
        }
        Ok(body)
    }
}
