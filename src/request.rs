use std::time::Duration;

use reqwest::Client;

use crate::{info_time, Result};

/// Fetches listing pages one at a time, sleeping a fixed delay after each fetch.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    delay: Duration,
}

impl Fetcher {
    pub fn new(delay: Duration) -> Self {
        // Client uses Arc internally so the fetcher is cheap to clone.
        Self {
            client: Client::new(),
            delay,
        }
    }

    /// Requests a page and returns its HTML.
    /// A non-2xx status is an error just like a network failure.
    pub async fn request_page_html(&self, url: &str) -> Result<String> {
        info_time!("GET {url}");
        let res = self.client.get(url).send().await?.error_for_status()?;
        let html = res.text().await?;
        tokio::time::sleep(self.delay).await;
        Ok(html)
    }
}
