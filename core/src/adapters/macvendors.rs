//! Vendor lookup through the macvendors.com HTTP API.
//!
//! The free tier answers roughly one request per second, so every call waits
//! on a shared token bucket before going out. A single attempt is made; any
//! non-200 answer is a miss.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lanscout_common::ReconError;
use lanscout_common::capability::VendorLookup;
use lanscout_common::config::LookupConfig;
use reqwest::{Client, StatusCode};
use tracing::debug;

const OPERATION: &str = "vendor lookup";

pub struct MacVendorsApi {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
    timeout: Duration,
}

impl MacVendorsApi {
    pub fn new(cfg: &LookupConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lanscout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let rps = NonZeroU32::new(cfg.requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::direct(Quota::per_second(rps)),
            timeout,
        })
    }

    fn url_for(&self, hardware_address: &str) -> String {
        format!("{}/{}", self.base_url, hardware_address)
    }

    async fn fetch(&self, url: &str) -> Result<Option<String>, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            debug!(status = %response.status(), "vendor lookup miss");
            return Ok(None);
        }

        let body = response.text().await?;
        let body = body.trim();
        Ok((!body.is_empty()).then(|| body.to_string()))
    }
}

#[async_trait]
impl VendorLookup for MacVendorsApi {
    async fn lookup(&self, hardware_address: &str) -> Result<Option<String>, ReconError> {
        self.limiter.until_ready().await;

        let url = self.url_for(hardware_address);
        match tokio::time::timeout(self.timeout, self.fetch(&url)).await {
            Err(_) => Err(ReconError::NetworkTimeout { operation: OPERATION }),
            Ok(Err(e)) if e.is_timeout() => Err(ReconError::NetworkTimeout { operation: OPERATION }),
            Ok(Err(e)) => Err(ReconError::unavailable(OPERATION, e)),
            Ok(Ok(vendor)) => Ok(vendor),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
