//! Country registry: Single source of truth for all supported countries.
//!
//! This module provides a centralized registry of the Lusophone countries
//! supported by the crate. It uses a singleton pattern with `OnceLock` to
//! ensure thread-safe initialization and access.

use crate::region::{Formality, Region};
use serde::Serialize;
use std::sync::OnceLock;

/// Metadata for a supported country.
#[derive(Debug, Clone, Serialize)]
pub struct CountryConfig {
    /// Two-letter country code (e.g., "PT", "BR")
    pub code: &'static str,

    /// Local display name (e.g., "Moçambique", "Brasil")
    pub name: &'static str,

    /// ISO 4217 currency code (e.g., "EUR", "MZN")
    pub currency_code: &'static str,

    /// Currency symbol as displayed locally (e.g., "€", "MT")
    pub currency_symbol: &'static str,

    /// International phone prefix, with leading "+" (e.g., "+258")
    pub phone_prefix: &'static str,

    /// Default formality register of the region's language use
    pub formality: Formality,

    /// POSIX-style locale identifier (e.g., "pt_MZ")
    pub locale: &'static str,

    /// IANA timezone of the country's capital (e.g., "Africa/Maputo")
    pub timezone: &'static str,
}

/// Currency code/symbol pair for a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
}

/// Global country registry singleton.
///
/// Initialized once on first access and immutable thereafter.
pub struct CountryRegistry {
    countries: Vec<CountryConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<CountryRegistry> = OnceLock::new();

impl CountryRegistry {
    /// Get the global country registry instance.
    pub fn get() -> &'static CountryRegistry {
        REGISTRY.get_or_init(|| CountryRegistry {
            countries: default_countries(),
        })
    }

    /// Get the configuration for a region.
    ///
    /// Every `Region` variant has exactly one registry entry, so this
    /// lookup cannot fail for a valid `Region`.
    pub fn country(&self, region: Region) -> &CountryConfig {
        self.countries
            .iter()
            .find(|c| c.code == region.code())
            .expect("every Region variant has a registry entry")
    }

    /// Get a country configuration by raw code, case-insensitively.
    ///
    /// # Returns
    /// * `Some(&CountryConfig)` if the code names a supported country
    /// * `None` otherwise
    pub fn by_code(&self, code: &str) -> Option<&CountryConfig> {
        Region::from_code(code).map(|region| self.country(region))
    }

    /// All supported countries, in canonical order.
    pub fn list_all(&self) -> Vec<&CountryConfig> {
        self.countries.iter().collect()
    }

    /// Check if a raw code names a supported Lusophone country.
    pub fn is_lusophone(&self, code: &str) -> bool {
        Region::from_code(code).is_some()
    }

    /// Currency code/symbol pair for a region.
    pub fn currency(&self, region: Region) -> CurrencyInfo {
        let config = self.country(region);
        CurrencyInfo {
            code: config.currency_code,
            symbol: config.currency_symbol,
        }
    }
}

/// Static country table.
///
/// One entry per `Region` variant, in canonical order.
fn default_countries() -> Vec<CountryConfig> {
    vec![
        CountryConfig {
            code: "PT",
            name: "Portugal",
            currency_code: "EUR",
            currency_symbol: "€",
            phone_prefix: "+351",
            formality: Formality::Formal,
            locale: "pt_PT",
            timezone: "Europe/Lisbon",
        },
        CountryConfig {
            code: "BR",
            name: "Brasil",
            currency_code: "BRL",
            currency_symbol: "R$",
            phone_prefix: "+55",
            formality: Formality::Informal,
            locale: "pt_BR",
            timezone: "America/Sao_Paulo",
        },
        CountryConfig {
            code: "MZ",
            name: "Moçambique",
            currency_code: "MZN",
            currency_symbol: "MT",
            phone_prefix: "+258",
            formality: Formality::Mixed,
            locale: "pt_MZ",
            timezone: "Africa/Maputo",
        },
        CountryConfig {
            code: "AO",
            name: "Angola",
            currency_code: "AOA",
            currency_symbol: "Kz",
            phone_prefix: "+244",
            formality: Formality::Formal,
            locale: "pt_AO",
            timezone: "Africa/Luanda",
        },
        CountryConfig {
            code: "CV",
            name: "Cabo Verde",
            currency_code: "CVE",
            currency_symbol: "Esc",
            phone_prefix: "+238",
            formality: Formality::Formal,
            locale: "pt_CV",
            timezone: "Atlantic/Cape_Verde",
        },
        CountryConfig {
            code: "GW",
            name: "Guiné-Bissau",
            currency_code: "XOF",
            currency_symbol: "CFA",
            phone_prefix: "+245",
            formality: Formality::Formal,
            locale: "pt_GW",
            timezone: "Africa/Bissau",
        },
        CountryConfig {
            code: "ST",
            name: "São Tomé e Príncipe",
            currency_code: "STN",
            currency_symbol: "Db",
            phone_prefix: "+239",
            formality: Formality::Formal,
            locale: "pt_ST",
            timezone: "Africa/Sao_Tome",
        },
        CountryConfig {
            code: "TL",
            name: "Timor-Leste",
            currency_code: "USD",
            currency_symbol: "$",
            phone_prefix: "+670",
            formality: Formality::Formal,
            locale: "pt_TL",
            timezone: "Asia/Dili",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = CountryRegistry::get();
        let registry2 = CountryRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_country_mozambique() {
        let info = CountryRegistry::get().country(Region::Mz);

        assert_eq!(info.name, "Moçambique");
        assert_eq!(info.currency_code, "MZN");
        assert_eq!(info.currency_symbol, "MT");
        assert_eq!(info.phone_prefix, "+258");
        assert_eq!(info.formality, Formality::Mixed);
    }

    #[test]
    fn test_country_portugal() {
        let info = CountryRegistry::get().country(Region::Pt);

        assert_eq!(info.name, "Portugal");
        assert_eq!(info.currency_code, "EUR");
        assert_eq!(info.currency_symbol, "€");
        assert_eq!(info.phone_prefix, "+351");
        assert_eq!(info.formality, Formality::Formal);
    }

    #[test]
    fn test_every_region_has_complete_metadata() {
        let registry = CountryRegistry::get();
        for region in Region::all() {
            let info = registry.country(region);
            assert!(!info.name.is_empty(), "{} name", region);
            assert_eq!(info.currency_code.len(), 3, "{} currency code", region);
            assert!(!info.currency_symbol.is_empty(), "{} symbol", region);
            assert!(info.phone_prefix.starts_with('+'), "{} prefix", region);
            assert!(!info.timezone.is_empty(), "{} timezone", region);
        }
    }

    #[test]
    fn test_by_code_case_insensitive() {
        let registry = CountryRegistry::get();
        assert_eq!(registry.by_code("mz").unwrap().name, "Moçambique");
        assert_eq!(registry.by_code("Br").unwrap().name, "Brasil");
    }

    #[test]
    fn test_by_code_unsupported() {
        let registry = CountryRegistry::get();
        assert!(registry.by_code("US").is_none());
        assert!(registry.by_code("").is_none());
    }

    #[test]
    fn test_list_all_covers_every_region() {
        let all = CountryRegistry::get().list_all();
        assert_eq!(all.len(), 8);
        for region in Region::all() {
            assert!(all.iter().any(|c| c.code == region.code()));
        }
    }

    #[test]
    fn test_is_lusophone() {
        let registry = CountryRegistry::get();
        assert!(registry.is_lusophone("PT"));
        assert!(registry.is_lusophone("br"));
        assert!(registry.is_lusophone("MZ"));
        assert!(!registry.is_lusophone("US"));
        assert!(!registry.is_lusophone("FR"));
    }

    #[test]
    fn test_currency_info() {
        let currency = CountryRegistry::get().currency(Region::Pt);
        assert_eq!(currency.code, "EUR");
        assert_eq!(currency.symbol, "€");

        let currency = CountryRegistry::get().currency(Region::Tl);
        assert_eq!(currency.code, "USD");
        assert_eq!(currency.symbol, "$");
    }
}
