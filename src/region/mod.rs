//! Region types and the country registry.
//!
//! This module is the single source of truth for the eight supported
//! Portuguese-speaking countries. All region-keyed logic elsewhere in the
//! crate (validation, formatting, translation) dispatches on the `Region`
//! type defined here and reads metadata from the `CountryRegistry`.
//!
//! # Architecture
//!
//! - `registry`: Static table of country metadata (currency, phone prefix, formality)
//! - `code`: Type-safe `Region` type validated against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use lusophone::region::{Region, CountryRegistry};
//!
//! let region = Region::from_code("mz").unwrap();
//! let info = CountryRegistry::get().country(region);
//! assert_eq!(info.currency_code, "MZN");
//! ```

mod code;
mod registry;

pub use code::{Formality, Region};
pub use registry::{CountryConfig, CountryRegistry, CurrencyInfo};
