//! Currency and number formatting per region.
//!
//! Four stylistic families cover the eight regions:
//!
//! - European (PT, default): `1 500,50 €`
//! - Brazilian (BR): `R$ 1.500,50`
//! - African (MZ, AO, CV, GW, ST): `1.500,50 MT`
//! - American (TL): `$1,500.50`
//!
//! Amounts are rendered to two decimal places with round-half-away-from-
//! zero rounding; `parse` is the inverse to within 0.01.

use crate::region::{CountryRegistry, Region};

/// Currency tokens recognized and stripped by `parse`, longest first so
/// "R$" is removed before "$".
const CURRENCY_TOKENS: [&str; 8] = ["R$", "€", "MT", "Kz", "Esc", "CFA", "Db", "$"];

/// Format an amount as currency in the region's convention.
pub fn format(amount: f64, region: Region) -> String {
    let symbol = CountryRegistry::get().currency(region).symbol;

    match region {
        Region::Br => format!("{} {}", symbol, group(amount, 2, ',', Some('.'))),
        Region::Mz | Region::Ao | Region::Cv | Region::Gw | Region::St => {
            format!("{} {}", group(amount, 2, ',', Some('.')), symbol)
        }
        Region::Tl => format!("{}{}", symbol, group(amount, 2, '.', Some(','))),
        _ => format!("{} {}", group(amount, 2, ',', Some(' ')), symbol),
    }
}

/// Format a bare number in the region's separator convention.
pub fn format_number(number: f64, decimals: usize, region: Region) -> String {
    match region {
        Region::Tl => group(number, decimals, '.', Some(',')),
        _ => group(number, decimals, ',', Some(' ')),
    }
}

/// Format a bare amount the way a form input expects it for the region.
pub fn format_for_input(amount: f64, region: Region) -> String {
    match region {
        Region::Tl => group(amount, 2, '.', Some(',')),
        Region::Br => group(amount, 2, ',', Some('.')),
        _ => group(amount, 2, ',', Some(' ')),
    }
}

/// Parse a currency string back into a number.
///
/// Known currency tokens are stripped first, then the region's separator
/// convention is undone. Unparseable remainders evaluate to 0.0; parsing
/// is as forgiving as the rest of the crate.
pub fn parse(value: &str, region: Region) -> f64 {
    let mut clean = value.to_string();
    for token in CURRENCY_TOKENS {
        clean = clean.replace(token, "");
    }
    let clean = clean.trim();

    // The non-American styles all use comma decimals; thousands are dots
    // (BR and the African style) or spaces (European), so both go
    let normalized = match region {
        Region::Tl => clean.replace(',', ""),
        _ => clean
            .replace(' ', "")
            .replace('.', "")
            .replace(',', "."),
    };

    normalized.parse().unwrap_or(0.0)
}

/// Format a min-max range, both ends in the region's currency convention.
pub fn format_range(min: f64, max: f64, region: Region) -> String {
    format!("{} - {}", format(min, region), format(max, region))
}

/// The currency symbol for a region.
pub fn symbol(region: Region) -> &'static str {
    CountryRegistry::get().currency(region).symbol
}

/// The ISO 4217 currency code for a region.
pub fn code(region: Region) -> &'static str {
    CountryRegistry::get().currency(region).code
}

/// Fixed-point rendering with thousands grouping.
///
/// `f64::round` rounds half away from zero, matching the required
/// rounding rule.
fn group(amount: f64, decimals: usize, decimal_sep: char, thousands_sep: Option<char>) -> String {
    let negative = amount < 0.0;
    let factor = 10u64.pow(decimals as u32);
    let scaled = (amount.abs() * factor as f64).round() as u64;
    let int_part = scaled / factor;
    let frac_part = scaled % factor;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if negative {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            if let Some(sep) = thousands_sep {
                grouped.push(sep);
            }
        }
        grouped.push(c);
    }

    if decimals > 0 {
        grouped.push(decimal_sep);
        grouped.push_str(&format!("{:0width$}", frac_part, width = decimals));
    }

    grouped
}
