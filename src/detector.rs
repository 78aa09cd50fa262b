//! Region detection: environment classification, multi-source voting, and
//! sticky session caching.
//!
//! Detection is deliberately forgiving. Every sub-detector is allowed to
//! fail (bad header, unreachable GeoIP provider, unparseable language tag)
//! and a failure only costs that detector its vote. The final answer is
//! always a supported region; unsupported inputs degrade to the configured
//! default instead of surfacing errors.

use crate::config::Config;
use crate::context::DetectionContext;
use crate::geoip::GeoIpClient;
use crate::region::{CountryConfig, CountryRegistry, CurrencyInfo, Region};
use crate::store::{DetectionCache, MemoryCache, MemorySessionStore, SessionStore};
use regex::Regex;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::info;

/// Session key holding the sticky detected region.
const SESSION_KEY: &str = "lusophone_region";

/// Whether a request runs against a development setup or a deployed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentType {
    Local,
    Online,
}

impl EnvironmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentType::Local => "local",
            EnvironmentType::Online => "online",
        }
    }
}

/// Multi-source region detector.
///
/// Resolution order: forced override, session-cached region, fresh
/// detection (which is then stored in the session).
pub struct RegionDetector {
    config: Config,
    session: Arc<dyn SessionStore>,
    cache: Arc<dyn DetectionCache>,
    geoip: GeoIpClient,
    /// Runtime override set through `force_region`; supersedes config
    forced: Mutex<Option<Region>>,
}

impl RegionDetector {
    /// Build a detector with in-memory session and cache stores.
    pub fn new(config: Config) -> Self {
        let session = Arc::new(MemorySessionStore::new());
        let cache = Arc::new(MemoryCache::new());
        Self::with_stores(config, session, cache)
    }

    /// Build a detector over host-provided session and cache stores.
    pub fn with_stores(
        config: Config,
        session: Arc<dyn SessionStore>,
        cache: Arc<dyn DetectionCache>,
    ) -> Self {
        let geoip = GeoIpClient::new(reqwest::Client::new(), &config);
        let forced = Mutex::new(config.force_region);
        Self {
            config,
            session,
            cache,
            geoip,
            forced,
        }
    }

    /// Detect the region for one request.
    ///
    /// A forced region wins over everything and is never written to the
    /// session; a session-cached region wins over fresh detection; fresh
    /// detection results stick in the session for the rest of the session.
    pub async fn detect(&self, ctx: &DetectionContext) -> Region {
        if let Some(forced) = *self.forced.lock().expect("forced lock poisoned") {
            return forced;
        }

        if let Some(cached) = self.session.get(SESSION_KEY) {
            return self.validate_region(&cached);
        }

        let detected = self.detect_environment_based(ctx).await;
        self.session.put(SESSION_KEY, detected.code());

        detected
    }

    /// Force an override region until cleared.
    ///
    /// An unsupported code degrades to the configured default region. The
    /// session-cached region is dropped so the override takes effect
    /// immediately; the override itself is never cached per-IP or
    /// per-session.
    pub fn force_region(&self, code: &str) -> Region {
        let region = self.validate_region(code);
        *self.forced.lock().expect("forced lock poisoned") = Some(region);
        self.session.forget(SESSION_KEY);
        region
    }

    /// Drop the session-cached region only.
    ///
    /// The IP cache and any forced override are left untouched.
    pub fn clear_detection_cache(&self) {
        self.session.forget(SESSION_KEY);
    }

    /// Expose the local/online classification for diagnostics.
    pub fn environment_type(&self, ctx: &DetectionContext) -> EnvironmentType {
        if self.is_local_environment(ctx) {
            EnvironmentType::Local
        } else {
            EnvironmentType::Online
        }
    }

    pub fn is_lusophone_country(&self, code: &str) -> bool {
        CountryRegistry::get().is_lusophone(code)
    }

    pub fn country_info(&self, region: Region) -> &'static CountryConfig {
        CountryRegistry::get().country(region)
    }

    pub fn currency_info(&self, region: Region) -> CurrencyInfo {
        CountryRegistry::get().currency(region)
    }

    pub fn all_countries(&self) -> Vec<&'static CountryConfig> {
        CountryRegistry::get().list_all()
    }

    /// Normalize a raw code to a supported region, or the configured default.
    fn validate_region(&self, code: &str) -> Region {
        Region::from_code(code).unwrap_or(self.config.default_region)
    }

    /// Local environments short-circuit to the configured local region with
    /// zero outbound calls; online environments get the full detection.
    async fn detect_environment_based(&self, ctx: &DetectionContext) -> Region {
        if self.is_local_environment(ctx) {
            info!(
                "Local environment detected, defaulting to {}",
                self.config.local_region
            );
            return self.config.local_region;
        }

        self.detect_from_multiple_sources(ctx).await
    }

    fn is_local_environment(&self, ctx: &DetectionContext) -> bool {
        if ctx.app_local {
            return true;
        }

        if let Some(ip) = ctx.ip.as_deref() {
            if is_private_or_loopback(ip) {
                return true;
            }
        }

        if !ctx.host.is_empty()
            && self
                .config
                .local_domains
                .iter()
                .any(|domain| ctx.host.contains(domain.as_str()))
        {
            return true;
        }

        if let Some(port) = ctx.port {
            if self.config.dev_ports.contains(&port) {
                return true;
            }
        }

        false
    }

    /// Run the three sub-detectors and combine by majority vote.
    ///
    /// Tie-break is first-encountered order in the vote list, which fixes
    /// the detector priority as headers, then IP, then Accept-Language.
    async fn detect_from_multiple_sources(&self, ctx: &DetectionContext) -> Region {
        let mut votes: Vec<Region> = Vec::with_capacity(3);

        if let Some(region) = self.detect_from_headers(ctx) {
            votes.push(region);
        }
        if let Some(region) = self.detect_from_ip(ctx).await {
            votes.push(region);
        }
        if let Some(region) = self.detect_from_accept_language(ctx) {
            votes.push(region);
        }

        if votes.is_empty() {
            return self.intelligent_fallback(ctx);
        }

        let winner = tally_votes(&votes);
        info!("Region detection resolved {} from {} vote(s)", winner, votes.len());
        winner
    }

    /// CDN country headers, in priority order. Only the first present
    /// header is considered; an unsupported value there is no vote.
    fn detect_from_headers(&self, ctx: &DetectionContext) -> Option<Region> {
        ["CF-IPCountry", "CloudFront-Viewer-Country", "X-Country-Code"]
            .iter()
            .find_map(|name| ctx.header(name))
            .and_then(Region::from_code)
    }

    /// IP geolocation vote, memoized per IP in the shared cache.
    ///
    /// Private and unparseable IPs are skipped without touching the
    /// network. Only successful external resolutions are cached.
    async fn detect_from_ip(&self, ctx: &DetectionContext) -> Option<Region> {
        let ip = ctx.ip.as_deref()?;

        let parsed: IpAddr = ip.parse().ok()?;
        if is_private_addr(&parsed) {
            return None;
        }

        let cache_key = format!("ip_detection_{ip}");
        if let Some(cached) = self.cache.get(&cache_key) {
            return Region::from_code(&cached);
        }

        let region = self.geoip.lookup(ip).await?;
        self.cache
            .put(&cache_key, region.code(), self.config.ip_cache_ttl);

        Some(region)
    }

    /// First Portuguese language tag in Accept-Language, mapped to its
    /// region. A bare "pt" maps to the configured default region.
    fn detect_from_accept_language(&self, ctx: &DetectionContext) -> Option<Region> {
        static TAG_RE: OnceLock<Regex> = OnceLock::new();
        let re = TAG_RE.get_or_init(|| {
            Regex::new(r"([a-z]{2})(?:-([A-Z]{2}))?").expect("language tag regex is valid")
        });

        for caps in re.captures_iter(ctx.accept_language()) {
            if &caps[1] != "pt" {
                continue;
            }
            return Some(match caps.get(2) {
                Some(country) => Region::from_code(country.as_str())?,
                None => self.config.default_region,
            });
        }

        None
    }

    /// Fallback when no detector voted: weak Portuguese signals first,
    /// then the application timezone, then the configured default.
    fn intelligent_fallback(&self, ctx: &DetectionContext) -> Region {
        let accept_language = ctx.accept_language();

        if accept_language.contains("pt") {
            if accept_language.contains("pt-MZ") || accept_language.contains("pt-AO") {
                return Region::Mz;
            }
            if accept_language.contains("pt-BR") {
                return Region::Br;
            }
            if accept_language.contains("pt-PT") {
                return Region::Pt;
            }
            return self.config.default_region;
        }

        if self.config.app_timezone.contains("Africa") {
            return self.config.default_region;
        }

        self.config.default_region
    }
}

/// Majority vote with first-encountered tie-break.
fn tally_votes(votes: &[Region]) -> Region {
    let mut tally: Vec<(Region, usize)> = Vec::new();

    for vote in votes {
        match tally.iter_mut().find(|(region, _)| region == vote) {
            Some((_, count)) => *count += 1,
            None => tally.push((*vote, 1)),
        }
    }

    // Only a strictly higher count replaces the leader, so equal counts
    // resolve to the first-encountered region
    let mut winner = tally[0];
    for &(region, count) in &tally[1..] {
        if count > winner.1 {
            winner = (region, count);
        }
    }
    winner.0
}

/// Loose string check used for environment classification, accepting the
/// literal "localhost" alongside real addresses.
fn is_private_or_loopback(ip: &str) -> bool {
    if ip == "localhost" {
        return true;
    }
    match ip.parse::<IpAddr>() {
        Ok(addr) => is_private_addr(&addr),
        Err(_) => false,
    }
}

fn is_private_addr(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_private() || v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_loopback(),
    }
}
