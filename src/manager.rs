//! Crate facade tying detection, validation, formatting, and translation
//! together behind one entry point.
//!
//! `Lusophone` owns a [`RegionDetector`] and delegates everything else to
//! the stateless modules, resolving the active region once per call so
//! host applications never juggle region arguments themselves unless they
//! want to.

use crate::config::Config;
use crate::context::DetectionContext;
use crate::currency;
use crate::detector::{EnvironmentType, RegionDetector};
use crate::region::{CountryConfig, CountryRegistry, CurrencyInfo, Region};
use crate::store::{DetectionCache, SessionStore};
use crate::translator::{self, RegionVariant, UsageContext};
use crate::validation;
use std::sync::Arc;

/// Region-aware localization facade.
pub struct Lusophone {
    detector: RegionDetector,
}

impl Lusophone {
    /// Build a facade with in-memory session and cache stores.
    pub fn new(config: Config) -> Self {
        Self {
            detector: RegionDetector::new(config),
        }
    }

    /// Build a facade over host-provided session and cache stores.
    pub fn with_stores(
        config: Config,
        session: Arc<dyn SessionStore>,
        cache: Arc<dyn DetectionCache>,
    ) -> Self {
        Self {
            detector: RegionDetector::with_stores(config, session, cache),
        }
    }

    // ==================== Detection ====================

    /// Detect the active region for a request.
    pub async fn detect_region(&self, ctx: &DetectionContext) -> Region {
        self.detector.detect(ctx).await
    }

    /// Force an override region until cleared; unsupported codes degrade
    /// to the configured default.
    pub fn force_region(&self, code: &str) -> Region {
        self.detector.force_region(code)
    }

    /// Drop the session-cached region so the next call re-detects.
    pub fn clear_detection_cache(&self) {
        self.detector.clear_detection_cache();
    }

    /// Local/online classification for the request, for diagnostics.
    pub fn environment_type(&self, ctx: &DetectionContext) -> EnvironmentType {
        self.detector.environment_type(ctx)
    }

    // ==================== Country metadata ====================

    pub fn country_info(&self, region: Region) -> &'static CountryConfig {
        CountryRegistry::get().country(region)
    }

    pub fn all_countries(&self) -> Vec<&'static CountryConfig> {
        CountryRegistry::get().list_all()
    }

    pub fn is_lusophone_country(&self, code: &str) -> bool {
        CountryRegistry::get().is_lusophone(code)
    }

    pub fn currency_info(&self, region: Region) -> CurrencyInfo {
        CountryRegistry::get().currency(region)
    }

    pub fn available_regions(&self) -> Vec<RegionVariant> {
        translator::available_regions()
    }

    // ==================== Validation ====================

    pub fn validate_tax_id(&self, value: &str, region: Region) -> bool {
        validation::validate_tax_id(value, region)
    }

    pub fn validate_phone(&self, value: &str, region: Region) -> bool {
        validation::validate_phone(value, region)
    }

    pub fn validate_postal_code(&self, value: &str, region: Region) -> bool {
        validation::validate_postal_code(value, region)
    }

    /// Locally-correct label for the tax identifier field (NIF/CPF/NUIT).
    pub fn tax_id_field_name(&self, region: Region) -> &'static str {
        validation::tax_id_field_name(region)
    }

    /// Locally-correct label for the mobile phone field.
    pub fn phone_field_name(&self, region: Region) -> &'static str {
        validation::phone_field_name(region)
    }

    // ==================== Formatting ====================

    pub fn format_currency(&self, amount: f64, region: Region) -> String {
        currency::format(amount, region)
    }

    pub fn format_number(&self, number: f64, decimals: usize, region: Region) -> String {
        currency::format_number(number, decimals, region)
    }

    pub fn parse_currency(&self, value: &str, region: Region) -> f64 {
        currency::parse(value, region)
    }

    pub fn format_currency_range(&self, min: f64, max: f64, region: Region) -> String {
        currency::format_range(min, max, region)
    }

    // ==================== Translation ====================

    pub fn translate(&self, key: &str, placeholders: &[(&str, &str)], region: Region) -> String {
        translator::translate(key, placeholders, region)
    }

    pub fn contextual_translate(
        &self,
        key: &str,
        context: UsageContext,
        placeholders: &[(&str, &str)],
        region: Region,
    ) -> String {
        translator::contextual_translate(key, context, placeholders, region)
    }

    pub fn detect_context(&self, ctx: &DetectionContext) -> UsageContext {
        translator::detect_context(ctx)
    }

    pub fn has_translation(&self, key: &str, region: Region) -> bool {
        translator::has_translation(key, region)
    }

    pub fn missing_translations(&self, keys: &[&str], region: Region) -> Vec<String> {
        translator::missing_translations(keys, region)
    }
}

impl Default for Lusophone {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
