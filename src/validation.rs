//! Per-country validators for tax identifiers, phone numbers, and postal
//! codes.
//!
//! All predicates are pure and side-effect free: malformed input evaluates
//! to `false`, never to an error. Regions without their own rule set fall
//! back to the Portuguese algorithm.

use crate::region::Region;
use regex::Regex;
use std::sync::OnceLock;

/// Validate a tax identifier under a region's rules.
pub fn validate_tax_id(value: &str, region: Region) -> bool {
    match region {
        Region::Pt => validate_portuguese_nif(value),
        Region::Br => validate_brazil_cpf(value),
        Region::Mz => validate_mozambique_nuit(value),
        Region::Ao => validate_angola_nif(value),
        Region::Cv => validate_cape_verde_nif(value),
        _ => validate_portuguese_nif(value),
    }
}

/// Validate a phone number under a region's rules.
///
/// Spaces, hyphens, and parentheses are stripped first, then the region's
/// calling-code prefix (with or without a leading `+`), then the remaining
/// digits are matched against the region's national pattern.
pub fn validate_phone(value: &str, region: Region) -> bool {
    let phone: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    match region {
        Region::Pt => validate_phone_pattern(&phone, "351", phone_re_pt()),
        Region::Br => validate_phone_pattern(&phone, "55", phone_re_br()),
        Region::Mz => validate_phone_pattern(&phone, "258", phone_re_mz()),
        Region::Ao => validate_phone_pattern(&phone, "244", phone_re_ao()),
        Region::Cv => validate_phone_pattern(&phone, "238", phone_re_cv()),
        _ => validate_phone_pattern(&phone, "351", phone_re_pt()),
    }
}

/// Validate a postal code under a region's format.
pub fn validate_postal_code(value: &str, region: Region) -> bool {
    static PT: OnceLock<Regex> = OnceLock::new();
    static BR: OnceLock<Regex> = OnceLock::new();
    static MZ: OnceLock<Regex> = OnceLock::new();
    static AO: OnceLock<Regex> = OnceLock::new();

    let re = match region {
        Region::Br => BR.get_or_init(|| Regex::new(r"^\d{5}-?\d{3}$").unwrap()),
        Region::Mz | Region::Cv => MZ.get_or_init(|| Regex::new(r"^\d{4}$").unwrap()),
        Region::Ao => AO.get_or_init(|| Regex::new(r"^[A-Z]{3}-\d{4}$").unwrap()),
        _ => PT.get_or_init(|| Regex::new(r"^\d{4}-\d{3}$").unwrap()),
    };

    re.is_match(value)
}

/// Locally-correct label for the tax identifier field.
pub fn tax_id_field_name(region: Region) -> &'static str {
    match region {
        Region::Br => "CPF",
        Region::Mz => "NUIT",
        _ => "NIF",
    }
}

/// Locally-correct label for the mobile phone field.
pub fn phone_field_name(region: Region) -> &'static str {
    match region {
        Region::Pt | Region::Ao => "Telemóvel",
        Region::Br | Region::Mz => "Celular",
        Region::Cv => "Telefone",
        _ => "Telemóvel",
    }
}

/// Portugal NIF: 9 digits, restricted first digit, mod-11 check digit.
pub fn validate_portuguese_nif(nif: &str) -> bool {
    let digits = digits_of(nif);
    if digits.len() != 9 {
        return false;
    }

    if !matches!(digits[0], 1 | 2 | 3 | 5 | 6 | 8 | 9) {
        return false;
    }

    let sum: u32 = digits[..8]
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (9 - i as u32))
        .sum();

    let mut check = 11 - (sum % 11);
    if check >= 10 {
        check = 0;
    }

    digits[8] == check
}

/// Mozambique NUIT: 9 digits, nonzero first digit. No published checksum.
pub fn validate_mozambique_nuit(nuit: &str) -> bool {
    let digits = digits_of(nuit);
    digits.len() == 9 && digits[0] != 0
}

/// Brazil CPF: 11 digits, repeated-digit sequences rejected, two
/// sequential mod-11 check digits.
pub fn validate_brazil_cpf(cpf: &str) -> bool {
    let digits = digits_of(cpf);
    if digits.len() != 11 {
        return false;
    }

    // "111.111.111-11" style sequences are numerically valid but blocked
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check = |upto: usize, start_weight: u32| -> u32 {
        let sum: u32 = digits[..upto]
            .iter()
            .enumerate()
            .map(|(i, &d)| d * (start_weight - i as u32))
            .sum();
        let remainder = sum % 11;
        if remainder < 2 {
            0
        } else {
            11 - remainder
        }
    };

    digits[9] == check(9, 10) && digits[10] == check(10, 11)
}

/// Angola NIF: exactly 10 digits.
pub fn validate_angola_nif(nif: &str) -> bool {
    digits_of(nif).len() == 10
}

/// Cape Verde NIF: exactly 9 digits.
pub fn validate_cape_verde_nif(nif: &str) -> bool {
    digits_of(nif).len() == 9
}

fn digits_of(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn validate_phone_pattern(phone: &str, calling_code: &str, re: &Regex) -> bool {
    let national = phone
        .strip_prefix(&format!("+{calling_code}"))
        .or_else(|| phone.strip_prefix(calling_code))
        .unwrap_or(phone);

    re.is_match(national)
}

fn phone_re_pt() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[29]\d{8}$").unwrap())
}

fn phone_re_br() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[1-9]{2}[2-9]\d{7,8}$").unwrap())
}

fn phone_re_mz() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[82]\d{7}$").unwrap())
}

fn phone_re_ao() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^9\d{8}$").unwrap())
}

fn phone_re_cv() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{7}$").unwrap())
}
