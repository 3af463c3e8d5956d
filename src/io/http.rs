use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::ArchiveSource;
use anyhow::{Result, bail};

/// Archive fetched in full from an HTTP(S) URL
pub struct HttpSource {
    client: Client,
    url: String,
    max_size: u64,
    transferred_bytes: AtomicU64,
    max_retry: u32,
}

impl HttpSource {
    pub fn new(url: String, max_size: u64) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            url,
            max_size,
            transferred_bytes: AtomicU64::new(0),
            max_retry: 10,
        })
    }

    /// Get total bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ArchiveSource for HttpSource {
    async fn load(&self) -> Result<Vec<u8>> {
        let mut retry_count = 0;

        let mut resp = loop {
            match self.client.get(&self.url).send().await {
                Ok(resp) => break resp,
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        bail!("Max retries exceeded");
                    }
                    warn!(
                        "Connection error, retry {}/{}: {}",
                        retry_count, self.max_retry, e
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        };

        if !resp.status().is_success() {
            bail!("HTTP request failed with status: {}", resp.status());
        }

        // Reject early when the server announces an oversized body
        if let Some(len) = resp.content_length()
            && len > self.max_size
        {
            bail!(
                "Remote archive is {} bytes, larger than the {} byte limit",
                len,
                self.max_size
            );
        }

        // Chunked responses carry no length up front, so count as we go
        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            self.transferred_bytes
                .fetch_add(chunk.len() as u64, Ordering::Relaxed);
            if (body.len() + chunk.len()) as u64 > self.max_size {
                bail!("Remote archive exceeds the {} byte limit", self.max_size);
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
