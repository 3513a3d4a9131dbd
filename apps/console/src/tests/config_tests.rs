use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn temp_dir(label: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("viral_scripts_{label}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

#[test]
fn missing_file_yields_defaults() {
    let dir = temp_dir("missing");
    let settings = load_settings(&dir.join(DEFAULT_CONFIG_FILE)).expect("settings");

    assert_eq!(settings.checkout_url, DEFAULT_CHECKOUT_URL);
    assert_eq!(settings.default_topic, "fitness tips");
    assert_eq!(settings.generation_delay(), Duration::from_millis(1000));

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn file_values_override_defaults() {
    let dir = temp_dir("file");
    let path = dir.join(DEFAULT_CONFIG_FILE);
    fs::write(
        &path,
        r#"
checkout_url = "https://pay.example.com/link?locale=en"
generation_delay_ms = 0
default_platform = "YouTube"
default_topic = "home workouts"
"#,
    )
    .expect("write settings");

    let settings = load_settings(&path).expect("settings");
    assert_eq!(settings.checkout_url, "https://pay.example.com/link?locale=en");
    assert_eq!(settings.generation_delay_ms, 0);
    assert_eq!(settings.checkout_delay_ms, 1000);
    assert_eq!(settings.default_platform, Platform::Youtube);
    assert_eq!(settings.default_topic, "home workouts");

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "checkout_ur = \"typo\"").is_err());
}

#[test]
fn env_overrides_take_precedence() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "default_topic = \"from file\"").expect("file");
    apply_env(
        &mut settings,
        lookup_from(&[
            ("APP__DEFAULT_TOPIC", "from env"),
            ("APP__CHECKOUT_DELAY_MS", "25"),
            ("APP__DEFAULT_PLATFORM", "instagram"),
        ]),
    );

    assert_eq!(settings.default_topic, "from env");
    assert_eq!(settings.checkout_delay(), Duration::from_millis(25));
    assert_eq!(settings.default_platform, Platform::Instagram);
}

#[test]
fn invalid_env_numbers_are_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[("APP__GENERATION_DELAY_MS", "soon")]),
    );
    assert_eq!(settings.generation_delay_ms, 1000);
}

#[test]
fn unknown_platform_falls_back_to_default() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[("APP__DEFAULT_PLATFORM", "myspace")]),
    );
    assert_eq!(settings.default_platform, Platform::Tiktok);
}

#[test]
fn invalid_endpoints_fail_validation() {
    let settings = Settings {
        checkout_url: "ftp://pay.example.com".into(),
        ..Settings::default()
    };
    assert!(validate(&settings).is_err());

    let settings = Settings {
        share_page_url: "not a url".into(),
        ..Settings::default()
    };
    assert!(validate(&settings).is_err());
    assert!(validate(&Settings::default()).is_ok());
}
