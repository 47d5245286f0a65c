//! # HTTP Catalog Provider
//!
//! Fetches `GET {base_url}/products` from the product service.
//!
//! ## Retry Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  attempt 1 ──► connection reset / 5xx ──► wait 500ms                   │
//! │  attempt 2 ──► connection reset / 5xx ──► wait 1s                      │
//! │  attempt 3 ──► connection reset / 5xx ──► wait 2s (capped)             │
//! │  attempt 4 ──► give up, CatalogError surfaces to the UI                │
//! │                                                                         │
//! │  4xx, undecodable payloads: no retry (same answer next time)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};
use crate::load::{from_values, CatalogLoad};
use crate::provider::CatalogProvider;

/// Settings for the HTTP provider.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Product service base URL; `/products` is appended.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// First retry delay.
    pub initial_backoff: Duration,

    /// Upper bound for a single retry delay.
    pub max_backoff: Duration,

    /// Retries after the first attempt (0 = no retry).
    pub max_retries: u32,
}

impl HttpCatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpCatalogConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

impl Default for HttpCatalogConfig {
    fn default() -> Self {
        HttpCatalogConfig {
            base_url: String::new(),
            timeout: Duration::from_secs(15),
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(2),
            max_retries: 3,
        }
    }
}

/// Catalog provider backed by the remote product service.
#[derive(Debug, Clone)]
pub struct HttpCatalogProvider {
    client: reqwest::Client,
    products_url: Url,
    config: HttpCatalogConfig,
}

impl HttpCatalogProvider {
    /// Builds the provider.
    ///
    /// ## Errors
    /// `InvalidUrl` if the base URL does not parse or is not http(s).
    pub fn new(config: HttpCatalogConfig) -> CatalogResult<Self> {
        let products_url = products_url(&config.base_url)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        Ok(HttpCatalogProvider {
            client,
            products_url,
            config,
        })
    }

    /// The full URL fetched by this provider.
    pub fn products_url(&self) -> &Url {
        &self.products_url
    }

    async fn fetch_once(&self) -> CatalogResult<CatalogLoad> {
        let response = self.client.get(self.products_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: self.products_url.to_string(),
            });
        }

        let values: Vec<serde_json::Value> = response.json().await?;
        from_values(values)
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.config.initial_backoff,
            current_interval: self.config.initial_backoff,
            max_interval: self.config.max_backoff,
            multiplier: 2.0,
            randomization_factor: 0.1,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    fn describe(&self) -> String {
        self.products_url.to_string()
    }

    async fn fetch(&self) -> CatalogResult<CatalogLoad> {
        let mut backoff = self.create_backoff();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(url = %self.products_url, attempt, "Fetching catalog");

            match self.fetch_once().await {
                Ok(load) => {
                    info!(
                        url = %self.products_url,
                        products = load.catalog.len(),
                        rejected = load.rejected.len(),
                        attempt,
                        "Catalog loaded"
                    );
                    return Ok(load);
                }
                Err(err) if err.is_transient() && attempt <= self.config.max_retries => {
                    let delay = backoff.next_backoff().unwrap_or(self.config.max_backoff);
                    warn!(error = %err, attempt, ?delay, "Catalog fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    warn!(error = %err, attempt, "Catalog fetch failed");
                    return Err(err);
                }
            }
        }
    }
}

/// `{base_url}/products`, keeping any path on the base (e.g. `/exec`).
fn products_url(base_url: &str) -> CatalogResult<Url> {
    let base = base_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(CatalogError::InvalidUrl("catalog URL is empty".to_string()));
    }

    let url = Url::parse(&format!("{}/products", base))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CatalogError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http or https",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn fast_config(base_url: String, max_retries: u32) -> HttpCatalogConfig {
        HttpCatalogConfig {
            base_url,
            timeout: Duration::from_secs(5),
            initial_backoff: Duration::from_millis(5),
            max_backoff: Duration::from_millis(10),
            max_retries,
        }
    }

    /// Serves one canned response per connection, in order.
    async fn serve(responses: Vec<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    #[test]
    fn test_products_url_keeps_base_path() {
        let url = products_url("https://script.example.com/macros/s/abc/exec/").unwrap();
        assert_eq!(url.as_str(), "https://script.example.com/macros/s/abc/exec/products");
    }

    #[test]
    fn test_products_url_rejects_bad_input() {
        assert!(matches!(products_url(""), Err(CatalogError::InvalidUrl(_))));
        assert!(matches!(products_url("not a url"), Err(CatalogError::InvalidUrl(_))));
        assert!(matches!(
            products_url("ftp://files.example.com"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let body = r#"[{"ID": 1, "Name": "Masala Chai", "Price": 100, "Available": "yes"}]"#;
        let base = serve(vec![http_response("200 OK", body)]).await;

        let provider = HttpCatalogProvider::new(fast_config(base, 0)).unwrap();
        let load = provider.fetch().await.unwrap();

        assert_eq!(load.catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_retries_server_errors() {
        let body = r#"[{"ID": 1, "Name": "Masala Chai", "Price": 100, "Available": "yes"}]"#;
        let base = serve(vec![
            http_response("503 Service Unavailable", ""),
            http_response("200 OK", body),
        ])
        .await;

        let provider = HttpCatalogProvider::new(fast_config(base, 2)).unwrap();
        let load = provider.fetch().await.unwrap();

        assert_eq!(load.catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_does_not_retry_client_errors() {
        let base = serve(vec![http_response("404 Not Found", "")]).await;

        let provider = HttpCatalogProvider::new(fast_config(base, 3)).unwrap();
        let err = provider.fetch().await.unwrap_err();

        assert!(matches!(err, CatalogError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let provider =
            HttpCatalogProvider::new(fast_config(format!("http://{}", addr), 1)).unwrap();
        let err = provider.fetch().await.unwrap_err();

        assert!(matches!(err, CatalogError::Request(_)));
    }
}
