//! End-to-end flows through the `Lusophone` facade, with GeoIP providers
//! mocked at the HTTP level.

use lusophone::store::{MemoryCache, MemorySessionStore};
use lusophone::{Config, DetectionContext, EnvironmentType, Lusophone, Region, UsageContext};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_with_geoip(server_uri: &str) -> Config {
    Config {
        geoip_primary_url: server_uri.to_string(),
        geoip_secondary_url: server_uri.to_string(),
        ..Config::default()
    }
}

fn offline_config() -> Config {
    // Unroutable providers so the IP sub-detector fails fast offline
    config_with_geoip("http://127.0.0.1:1")
}

fn online_ctx() -> DetectionContext {
    DetectionContext::new()
        .with_ip("196.28.232.10")
        .with_host("app.example.com")
        .with_port(443)
}

// ==================== GeoIP-Driven Detection ====================

#[tokio::test]
async fn detects_region_from_geoip_vote() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/196.28.232.10/country/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("MZ"))
        .mount(&server)
        .await;

    let lusophone = Lusophone::new(config_with_geoip(&server.uri()));

    assert_eq!(lusophone.detect_region(&online_ctx()).await, Region::Mz);
}

#[tokio::test]
async fn geoip_result_is_memoized_per_ip() {
    let server = MockServer::start().await;

    // The provider must be hit exactly once; the second detection for the
    // same IP must come from the shared cache
    Mock::given(method("GET"))
        .and(path("/196.28.232.10/country/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("BR"))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySessionStore::new());
    let cache = Arc::new(MemoryCache::new());
    let lusophone = Lusophone::with_stores(config_with_geoip(&server.uri()), session, cache);

    assert_eq!(lusophone.detect_region(&online_ctx()).await, Region::Br);

    // Drop the session-cached region; the IP cache must still answer
    lusophone.clear_detection_cache();
    assert_eq!(lusophone.detect_region(&online_ctx()).await, Region::Br);

    server.verify().await;
}

#[tokio::test]
async fn majority_vote_outvotes_single_geoip_answer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/196.28.232.10/country/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("BR"))
        .mount(&server)
        .await;

    // Header and Accept-Language both say PT: two votes against one
    let ctx = online_ctx()
        .with_header("CF-IPCountry", "PT")
        .with_header("Accept-Language", "pt-PT,pt;q=0.9");

    let lusophone = Lusophone::new(config_with_geoip(&server.uri()));

    assert_eq!(lusophone.detect_region(&ctx).await, Region::Pt);
}

#[tokio::test]
async fn geoip_outage_degrades_to_other_votes() {
    let ctx = online_ctx().with_header("Accept-Language", "pt-AO,pt;q=0.8");
    let lusophone = Lusophone::new(offline_config());

    assert_eq!(lusophone.detect_region(&ctx).await, Region::Ao);
}

#[tokio::test]
async fn no_signals_at_all_falls_back_to_default() {
    let ctx = DetectionContext::new()
        .with_host("app.example.com")
        .with_port(443);
    let lusophone = Lusophone::new(offline_config());

    assert_eq!(lusophone.detect_region(&ctx).await, Region::Mz);
}

#[tokio::test]
async fn local_environment_never_reaches_geoip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("BR"))
        .expect(0)
        .mount(&server)
        .await;

    let lusophone = Lusophone::new(config_with_geoip(&server.uri()));
    let ctx = DetectionContext::new().with_ip("192.168.1.10");

    assert_eq!(lusophone.environment_type(&ctx), EnvironmentType::Local);
    assert_eq!(lusophone.detect_region(&ctx).await, Region::Mz);

    server.verify().await;
}

#[tokio::test]
async fn forced_region_survives_conflicting_signals() {
    let lusophone = Lusophone::new(offline_config());
    let ctx = online_ctx().with_header("CF-IPCountry", "BR");

    lusophone.force_region("CV");
    assert_eq!(lusophone.detect_region(&ctx).await, Region::Cv);
}

// ==================== Detection-To-Localization Flows ====================

#[tokio::test]
async fn detected_region_drives_validation_and_formatting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/41.220.1.1/country/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("MZ"))
        .mount(&server)
        .await;

    let lusophone = Lusophone::new(config_with_geoip(&server.uri()));
    let ctx = DetectionContext::new()
        .with_ip("41.220.1.1")
        .with_host("app.example.com")
        .with_port(443);

    let region = lusophone.detect_region(&ctx).await;
    assert_eq!(region, Region::Mz);

    assert_eq!(lusophone.tax_id_field_name(region), "NUIT");
    assert!(lusophone.validate_tax_id("123456789", region));
    assert!(lusophone.validate_phone("+258 84 123 456", region));
    assert_eq!(lusophone.format_currency(1500.50, region), "1.500,50 MT");
}

#[tokio::test]
async fn brazilian_flow() {
    let lusophone = Lusophone::new(offline_config());
    let ctx = online_ctx().with_header("CF-IPCountry", "BR");

    let region = lusophone.detect_region(&ctx).await;
    assert_eq!(region, Region::Br);

    assert_eq!(lusophone.tax_id_field_name(region), "CPF");
    assert!(lusophone.validate_tax_id("111.444.777-35", region));
    assert!(lusophone.validate_postal_code("01310-100", region));
    assert_eq!(lusophone.format_currency(1500.50, region), "R$ 1.500,50");
    assert_eq!(lusophone.translate("Save", &[], region), "Salvar");
}

#[tokio::test]
async fn portuguese_flow() {
    let lusophone = Lusophone::new(offline_config());
    let ctx = online_ctx().with_header("Accept-Language", "pt-PT,pt;q=0.9,en;q=0.5");

    let region = lusophone.detect_region(&ctx).await;
    assert_eq!(region, Region::Pt);

    assert!(lusophone.validate_tax_id("123456789", region));
    assert!(lusophone.validate_postal_code("1000-100", region));
    assert_eq!(lusophone.phone_field_name(region), "Telemóvel");
    assert_eq!(lusophone.format_currency(1500.50, region), "1 500,50 €");
    assert_eq!(lusophone.translate("Save", &[], region), "Guardar");
    assert_eq!(lusophone.translate("settings", &[], region), "Definições");
}

// ==================== Formatting Conventions ====================

#[test]
fn currency_conventions_per_region() {
    let lusophone = Lusophone::new(offline_config());

    assert_eq!(lusophone.format_currency(1500.50, Region::Pt), "1 500,50 €");
    assert_eq!(lusophone.format_currency(1500.50, Region::Br), "R$ 1.500,50");
    assert_eq!(lusophone.format_currency(1500.50, Region::Mz), "1.500,50 MT");
    assert_eq!(lusophone.format_currency(1500.50, Region::Ao), "1.500,50 Kz");
    assert_eq!(lusophone.format_currency(1500.50, Region::Tl), "$1,500.50");
}

#[test]
fn currency_parse_inverts_format() {
    let lusophone = Lusophone::new(offline_config());

    for region in Region::all() {
        let formatted = lusophone.format_currency(1234.56, region);
        let parsed = lusophone.parse_currency(&formatted, region);
        assert!(
            (parsed - 1234.56).abs() < 0.01,
            "{region}: {formatted} parsed to {parsed}"
        );
    }
}

// ==================== Translation Flows ====================

#[test]
fn contextual_translation_adapts_register() {
    let lusophone = Lusophone::new(offline_config());

    assert_eq!(
        lusophone.contextual_translate("greeting", UsageContext::Business, &[], Region::Mz),
        "bom dia"
    );
    assert_eq!(
        lusophone.contextual_translate("greeting", UsageContext::Government, &[], Region::Mz),
        "respeitosos cumprimentos"
    );
}

#[test]
fn context_detected_from_request_path() {
    let lusophone = Lusophone::new(offline_config());

    let ctx = DetectionContext::new().with_path("/admin/reports");
    assert_eq!(lusophone.detect_context(&ctx), UsageContext::Business);

    let ctx = DetectionContext::new().with_path("/government/forms");
    assert_eq!(lusophone.detect_context(&ctx), UsageContext::Government);
}

#[test]
fn missing_translation_audit() {
    let lusophone = Lusophone::new(offline_config());

    let missing = lusophone.missing_translations(
        &["save", "welcome", "made.up.key", "another.fake"],
        Region::Pt,
    );
    assert_eq!(
        missing,
        vec!["made.up.key".to_string(), "another.fake".to_string()]
    );
}

// ==================== Country Metadata ====================

#[test]
fn all_eight_countries_are_exposed() {
    let lusophone = Lusophone::new(offline_config());

    let countries = lusophone.all_countries();
    assert_eq!(countries.len(), 8);
    assert!(countries.iter().any(|c| c.name == "Moçambique"));
    assert!(countries.iter().any(|c| c.name == "Timor-Leste"));

    assert!(lusophone.is_lusophone_country("GW"));
    assert!(lusophone.is_lusophone_country("st"));
    assert!(!lusophone.is_lusophone_country("US"));
}
