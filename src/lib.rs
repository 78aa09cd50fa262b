//! Region-aware localization for the Portuguese-speaking world.
//!
//! The crate detects which of the eight Lusophone countries a request
//! comes from (CDN headers, GeoIP, Accept-Language, majority vote), then
//! localizes on top of that: tax-ID/phone/postal validation per country,
//! currency and number formatting per regional convention, and
//! translation with dialect terminology, formality register, and usage
//! context applied.
//!
//! Most applications go through the [`Lusophone`] facade:
//!
//! ```no_run
//! use lusophone::{Config, DetectionContext, Lusophone};
//!
//! # async fn demo() {
//! let lusophone = Lusophone::new(Config::default());
//! let ctx = DetectionContext::new()
//!     .with_ip("196.28.232.10")
//!     .with_header("Accept-Language", "pt-MZ,pt;q=0.9");
//!
//! let region = lusophone.detect_region(&ctx).await;
//! let price = lusophone.format_currency(1500.50, region);
//! let valid = lusophone.validate_tax_id("123456789", region);
//! # let _ = (price, valid);
//! # }
//! ```
//!
//! The underlying modules are public for hosts that want a single piece
//! (for example `validation` in a form handler that already knows its
//! region).

pub mod config;
pub mod context;
pub mod currency;
pub mod detector;
pub mod geoip;
pub mod interceptor;
pub mod manager;
pub mod region;
pub mod store;
pub mod translator;
pub mod validation;

pub use config::Config;
pub use context::DetectionContext;
pub use detector::{EnvironmentType, RegionDetector};
pub use interceptor::PhraseEntry;
pub use manager::Lusophone;
pub use region::{CountryConfig, CountryRegistry, CurrencyInfo, Formality, Region};
pub use translator::{RegionVariant, UsageContext};
