//! Outbound GeoIP lookups.
//!
//! Two providers are tried in order, each with its own small timeout:
//! the primary returns the country code as a plain-text body, the
//! secondary returns JSON with a `countryCode` field. Any failure here is
//! a non-event for detection; callers treat it as "no vote".

use crate::config::Config;
use crate::region::Region;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct SecondaryResponse {
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
}

/// GeoIP client over the two configured providers.
#[derive(Debug, Clone)]
pub struct GeoIpClient {
    client: reqwest::Client,
    primary_url: String,
    secondary_url: String,
    timeout: std::time::Duration,
}

impl GeoIpClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            primary_url: config.geoip_primary_url.clone(),
            secondary_url: config.geoip_secondary_url.clone(),
            timeout: config.geoip_timeout,
        }
    }

    /// Resolve an IP to a supported region, trying both providers.
    ///
    /// Returns `None` when neither provider yields a supported region,
    /// whether because of a network failure or because the IP resolves to a
    /// non-Lusophone country. Failures are logged, never propagated.
    pub async fn lookup(&self, ip: &str) -> Option<Region> {
        match self.lookup_primary(ip).await {
            Ok(Some(region)) => return Some(region),
            Ok(None) => {}
            Err(e) => warn!("Primary GeoIP lookup failed for {}: {:#}", ip, e),
        }

        match self.lookup_secondary(ip).await {
            Ok(region) => region,
            Err(e) => {
                warn!("Secondary GeoIP lookup failed for {}: {:#}", ip, e);
                None
            }
        }
    }

    /// Primary provider: plain-text country code at `/{ip}/country/`.
    async fn lookup_primary(&self, ip: &str) -> Result<Option<Region>> {
        let url = format!("{}/{}/country/", self.primary_url, ip);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to send request to primary GeoIP provider")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Primary GeoIP provider error ({}): {}", status, body);
        }

        let body = response
            .text()
            .await
            .context("Failed to read primary GeoIP response body")?;

        Ok(Region::from_code(body.trim()))
    }

    /// Secondary provider: JSON body at `/json/{ip}?fields=countryCode`.
    async fn lookup_secondary(&self, ip: &str) -> Result<Option<Region>> {
        let url = format!("{}/json/{}?fields=countryCode", self.secondary_url, ip);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to send request to secondary GeoIP provider")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Secondary GeoIP provider error ({}): {}", status, body);
        }

        let parsed: SecondaryResponse = response
            .json()
            .await
            .context("Failed to parse secondary GeoIP response")?;

        Ok(parsed
            .country_code
            .as_deref()
            .and_then(Region::from_code))
    }
}
