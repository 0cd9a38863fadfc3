use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

/// Build the HTTP client shared by every webhook and push provider
///
/// One client is built per run and cloned into each provider, so all
/// destinations share one connection pool.
///
/// # Features
/// - **Timeouts**: `http.timeout_seconds` per request, 10s connect timeout
/// - **Compression**: gzip and deflate
/// - **HTTP/2**: adaptive window sizing
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
pub fn build_http_client(config: &HttpConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        // Compression
        .gzip(true)
        .deflate(true)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e).context("failed to build HTTP client"),
        })
}
