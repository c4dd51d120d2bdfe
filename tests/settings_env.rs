//! Environment-driven configuration. Process env is global, so these
//! run serially.

use serial_test::serial;

use fabrica::{ApiMode, Settings};

fn set(key: &str, value: &str) {
    // Safe here: #[serial] keeps env-mutating tests off other threads.
    unsafe { std::env::set_var(key, value) };
}

fn unset(key: &str) {
    unsafe { std::env::remove_var(key) };
}

#[test]
#[serial]
fn mode_and_urls_come_from_the_environment() {
    set("FABRICA__API__MODE", "production");
    set("FABRICA__API__PRODUCTION_URL", "https://api.example.com");
    set("FABRICA__API__DEVELOPMENT_URL", "http://localhost:4000");

    let settings = Settings::load().unwrap();
    assert_eq!(settings.api.mode, ApiMode::Production);
    assert_eq!(settings.api.base_url(), "https://api.example.com");

    set("FABRICA__API__MODE", "development");
    let settings = Settings::load().unwrap();
    assert_eq!(settings.api.base_url(), "http://localhost:4000");

    unset("FABRICA__API__MODE");
    unset("FABRICA__API__PRODUCTION_URL");
    unset("FABRICA__API__DEVELOPMENT_URL");
}

#[test]
#[serial]
fn cache_windows_are_tunable_from_the_environment() {
    set("FABRICA__CACHE__LIST_DETAIL_TTL_SECS", "60");
    set("FABRICA__CACHE__EXISTENCE_TTL_SECS", "5");

    let settings = Settings::load().unwrap();
    assert_eq!(settings.cache.list_detail_ttl_secs, 60);
    assert_eq!(settings.cache.existence_ttl_secs, 5);
    // Untouched settings keep their defaults.
    assert_eq!(settings.cache.translation_ttl_secs, 600);
    assert!(settings.cache.enabled);

    unset("FABRICA__CACHE__LIST_DETAIL_TTL_SECS");
    unset("FABRICA__CACHE__EXISTENCE_TTL_SECS");
}

#[test]
#[serial]
fn defaults_apply_with_a_clean_environment() {
    for key in [
        "FABRICA__API__MODE",
        "FABRICA__API__PRODUCTION_URL",
        "FABRICA__API__DEVELOPMENT_URL",
        "FABRICA__CACHE__LIST_DETAIL_TTL_SECS",
        "FABRICA__CACHE__EXISTENCE_TTL_SECS",
    ] {
        unset(key);
    }

    let settings = Settings::load().unwrap();
    assert_eq!(settings.api.mode, ApiMode::Development);
    assert_eq!(settings.cache.list_detail_ttl_secs, 300);
}
