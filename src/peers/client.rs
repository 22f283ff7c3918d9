use super::types::PeerGetter;
use crate::error::PeerError;

use async_trait::async_trait;
use std::time::Duration;

/// HTTP client handle for one peer.
#[derive(Debug, Clone)]
pub struct HttpGetter {
    /// Peer address plus base path, e.g. `http://10.0.0.2:8001/_geecache/`.
    base_url: String,
    http_client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpGetter {
    pub fn new(base_url: String, http_client: reqwest::Client, timeout: Option<Duration>) -> Self {
        Self {
            base_url,
            http_client,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, group: &str, key: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            urlencoding::encode(group),
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl PeerGetter for HttpGetter {
    async fn get(&self, group: &str, key: &str) -> Result<Vec<u8>, PeerError> {
        let url = self.url_for(group, key);

        let mut request = self.http_client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(PeerError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await.map_err(PeerError::Body)?;
        Ok(body.to_vec())
    }
}
