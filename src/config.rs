use crate::region::Region;
use anyhow::{Context, Result};
use std::time::Duration;

/// Crate configuration.
///
/// Mirrors the host application's config store: everything here can be
/// overridden through `LUSOPHONE_*` environment variables, with defaults
/// matching the environment-aware (MZ-first) detection behavior.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback region when detection cannot resolve one
    pub default_region: Region,
    /// Region returned immediately in local/development environments
    pub local_region: Region,
    /// Explicit override that supersedes all detection when set
    pub force_region: Option<Region>,

    /// Host suffixes classified as local environments
    pub local_domains: Vec<String>,
    /// Ports classified as development servers
    pub dev_ports: Vec<u16>,

    /// Application timezone, used as a last-resort detection hint
    pub app_timezone: String,

    /// Primary GeoIP provider base URL (plain-text country code body)
    pub geoip_primary_url: String,
    /// Secondary GeoIP provider base URL (JSON body with a countryCode field)
    pub geoip_secondary_url: String,
    /// Per-provider request timeout
    pub geoip_timeout: Duration,

    /// TTL for the shared IP -> region cache
    pub ip_cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_region: Region::Mz,
            local_region: Region::Mz,
            force_region: None,
            local_domains: vec![
                ".local".to_string(),
                ".test".to_string(),
                ".localhost".to_string(),
                "localhost".to_string(),
            ],
            dev_ports: vec![8000, 8080, 3000, 5173, 5174, 9000],
            app_timezone: "Africa/Maputo".to_string(),
            geoip_primary_url: "https://ipapi.co".to_string(),
            geoip_secondary_url: "http://ip-api.com".to_string(),
            geoip_timeout: Duration::from_secs(3),
            ip_cache_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        Ok(Self {
            default_region: std::env::var("LUSOPHONE_DEFAULT_REGION")
                .ok()
                .map(|v| {
                    Region::from_code(&v)
                        .with_context(|| format!("Unsupported LUSOPHONE_DEFAULT_REGION: {v}"))
                })
                .transpose()?
                .unwrap_or(defaults.default_region),

            local_region: std::env::var("LUSOPHONE_LOCAL_REGION")
                .ok()
                .map(|v| {
                    Region::from_code(&v)
                        .with_context(|| format!("Unsupported LUSOPHONE_LOCAL_REGION: {v}"))
                })
                .transpose()?
                .unwrap_or(defaults.local_region),

            // An unsupported forced region is dropped rather than rejected:
            // detection must never fail hard on a bad region code.
            force_region: std::env::var("LUSOPHONE_FORCE_REGION")
                .ok()
                .and_then(|v| Region::from_code(&v)),

            local_domains: defaults.local_domains,

            dev_ports: std::env::var("LUSOPHONE_DEV_PORTS")
                .ok()
                .map(|v| {
                    v.split(',')
                        .filter_map(|p| p.trim().parse().ok())
                        .collect()
                })
                .unwrap_or(defaults.dev_ports),

            app_timezone: std::env::var("LUSOPHONE_APP_TIMEZONE")
                .unwrap_or(defaults.app_timezone),

            geoip_primary_url: std::env::var("LUSOPHONE_GEOIP_PRIMARY_URL")
                .unwrap_or(defaults.geoip_primary_url),
            geoip_secondary_url: std::env::var("LUSOPHONE_GEOIP_SECONDARY_URL")
                .unwrap_or(defaults.geoip_secondary_url),
            geoip_timeout: std::env::var("LUSOPHONE_GEOIP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.geoip_timeout),

            ip_cache_ttl: std::env::var("LUSOPHONE_IP_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.ip_cache_ttl),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Default Tests ====================

    #[test]
    fn test_default_regions_are_mozambique() {
        let config = Config::default();
        assert_eq!(config.default_region, Region::Mz);
        assert_eq!(config.local_region, Region::Mz);
        assert!(config.force_region.is_none());
    }

    #[test]
    fn test_default_dev_ports() {
        let config = Config::default();
        assert_eq!(config.dev_ports, vec![8000, 8080, 3000, 5173, 5174, 9000]);
    }

    #[test]
    fn test_default_local_domains() {
        let config = Config::default();
        assert!(config.local_domains.contains(&".test".to_string()));
        assert!(config.local_domains.contains(&"localhost".to_string()));
    }

    #[test]
    fn test_default_timeouts() {
        let config = Config::default();
        assert_eq!(config.geoip_timeout, Duration::from_secs(3));
        assert_eq!(config.ip_cache_ttl, Duration::from_secs(604_800));
    }

    #[test]
    fn test_default_app_timezone_is_african() {
        let config = Config::default();
        assert!(config.app_timezone.contains("Africa"));
    }
}
