use crate::error::ImportError;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Fetches a page through a read proxy that returns the rendered page as
/// markdown-ish text. The target URL is appended to the proxy base:
/// `GET {base}/{url}`.
pub struct ReaderFetcher {
    base_url: String,
    client: Client,
}

impl ReaderFetcher {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self, url: &str) -> String {
        format!("{}/{}", self.base_url, url)
    }

    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        let endpoint = self.endpoint(url);
        debug!("ReaderFetcher: GET {}", endpoint);
        let response = self.client.get(&endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::HttpStatus {
                url: endpoint,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
