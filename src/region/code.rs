//! Region type: validated two-letter codes for the supported countries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight supported Portuguese-speaking countries.
///
/// The variant order is also the canonical iteration order used by
/// `Region::all()` and by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Portugal
    Pt,
    /// Brasil
    Br,
    /// Moçambique
    Mz,
    /// Angola
    Ao,
    /// Cabo Verde
    Cv,
    /// Guiné-Bissau
    Gw,
    /// São Tomé e Príncipe
    St,
    /// Timor-Leste
    Tl,
}

/// Default formality register of a region's language use.
///
/// Drives the phrase-level substitutions applied by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formality {
    Formal,
    Informal,
    Mixed,
}

impl Region {
    /// All supported regions, in canonical order.
    pub const ALL: [Region; 8] = [
        Region::Pt,
        Region::Br,
        Region::Mz,
        Region::Ao,
        Region::Cv,
        Region::Gw,
        Region::St,
        Region::Tl,
    ];

    /// Parse a two-letter country code, case-insensitively.
    ///
    /// # Returns
    /// * `Some(Region)` for a supported code ("PT", "br", "Mz", ...)
    /// * `None` for anything else (unsupported country, empty string, garbage)
    pub fn from_code(code: &str) -> Option<Region> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PT" => Some(Region::Pt),
            "BR" => Some(Region::Br),
            "MZ" => Some(Region::Mz),
            "AO" => Some(Region::Ao),
            "CV" => Some(Region::Cv),
            "GW" => Some(Region::Gw),
            "ST" => Some(Region::St),
            "TL" => Some(Region::Tl),
            _ => None,
        }
    }

    /// The uppercase two-letter code ("PT", "BR", ...).
    pub fn code(&self) -> &'static str {
        match self {
            Region::Pt => "PT",
            Region::Br => "BR",
            Region::Mz => "MZ",
            Region::Ao => "AO",
            Region::Cv => "CV",
            Region::Gw => "GW",
            Region::St => "ST",
            Region::Tl => "TL",
        }
    }

    /// The POSIX-style locale identifier for this region ("pt_PT", "pt_BR", ...).
    pub fn locale(&self) -> &'static str {
        match self {
            Region::Pt => "pt_PT",
            Region::Br => "pt_BR",
            Region::Mz => "pt_MZ",
            Region::Ao => "pt_AO",
            Region::Cv => "pt_CV",
            Region::Gw => "pt_GW",
            Region::St => "pt_ST",
            Region::Tl => "pt_TL",
        }
    }

    /// All supported regions, in canonical order.
    pub fn all() -> impl Iterator<Item = Region> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Formality::Formal => "formal",
            Formality::Informal => "informal",
            Formality::Mixed => "mixed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_uppercase() {
        assert_eq!(Region::from_code("PT"), Some(Region::Pt));
        assert_eq!(Region::from_code("BR"), Some(Region::Br));
        assert_eq!(Region::from_code("MZ"), Some(Region::Mz));
        assert_eq!(Region::from_code("TL"), Some(Region::Tl));
    }

    #[test]
    fn test_from_code_lowercase_and_mixed() {
        assert_eq!(Region::from_code("pt"), Some(Region::Pt));
        assert_eq!(Region::from_code("Mz"), Some(Region::Mz));
        assert_eq!(Region::from_code("aO"), Some(Region::Ao));
    }

    #[test]
    fn test_from_code_trims_whitespace() {
        assert_eq!(Region::from_code(" CV "), Some(Region::Cv));
        assert_eq!(Region::from_code("GW\n"), Some(Region::Gw));
    }

    #[test]
    fn test_from_code_unsupported() {
        assert_eq!(Region::from_code("US"), None);
        assert_eq!(Region::from_code("FR"), None);
        assert_eq!(Region::from_code("ES"), None);
    }

    #[test]
    fn test_from_code_garbage() {
        assert_eq!(Region::from_code(""), None);
        assert_eq!(Region::from_code("PTX"), None);
        assert_eq!(Region::from_code("12"), None);
    }

    // ==================== code / locale Tests ====================

    #[test]
    fn test_code_round_trips() {
        for region in Region::all() {
            assert_eq!(Region::from_code(region.code()), Some(region));
        }
    }

    #[test]
    fn test_locale_format() {
        for region in Region::all() {
            let locale = region.locale();
            assert!(locale.starts_with("pt_"));
            assert_eq!(&locale[3..], region.code());
        }
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(Region::Mz.to_string(), "MZ");
        assert_eq!(format!("{}", Region::Pt), "PT");
    }

    // ==================== all Tests ====================

    #[test]
    fn test_all_has_eight_regions() {
        assert_eq!(Region::all().count(), 8);
    }

    #[test]
    fn test_all_starts_with_portugal() {
        assert_eq!(Region::all().next(), Some(Region::Pt));
    }

    // ==================== Formality Tests ====================

    #[test]
    fn test_formality_as_str() {
        assert_eq!(Formality::Formal.as_str(), "formal");
        assert_eq!(Formality::Informal.as_str(), "informal");
        assert_eq!(Formality::Mixed.as_str(), "mixed");
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_region_serializes() {
        let json = serde_json::to_string(&Region::Mz).expect("Should serialize");
        assert_eq!(json, "\"Mz\"");
    }
}
