use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use script_core::{checkout::DEFAULT_CHECKOUT_URL, template::resolve_platform, CheckoutConfig};
use serde::Deserialize;
use shared::domain::Platform;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "viral_scripts.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub checkout_url: String,
    pub share_page_url: String,
    pub generation_delay_ms: u64,
    pub checkout_delay_ms: u64,
    pub default_platform: Platform,
    pub default_topic: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            checkout_url: DEFAULT_CHECKOUT_URL.into(),
            share_page_url: "https://viralscriptfactory.com/".into(),
            generation_delay_ms: 1000,
            checkout_delay_ms: 1000,
            default_platform: Platform::Tiktok,
            default_topic: "fitness tips".into(),
        }
    }
}

impl Settings {
    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    pub fn checkout_config(&self) -> anyhow::Result<CheckoutConfig> {
        Ok(CheckoutConfig::new(&self.checkout_url)?)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    checkout_url: Option<String>,
    share_page_url: Option<String>,
    generation_delay_ms: Option<u64>,
    checkout_delay_ms: Option<u64>,
    default_platform: Option<String>,
    default_topic: Option<String>,
}

/// Defaults, then the TOML file at `path` if it exists, then `APP__*` variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config: no settings file, using defaults");
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    validate(&settings)?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.checkout_url {
        settings.checkout_url = v;
    }
    if let Some(v) = file_cfg.share_page_url {
        settings.share_page_url = v;
    }
    if let Some(v) = file_cfg.generation_delay_ms {
        settings.generation_delay_ms = v;
    }
    if let Some(v) = file_cfg.checkout_delay_ms {
        settings.checkout_delay_ms = v;
    }
    if let Some(v) = file_cfg.default_platform {
        settings.default_platform = resolve_platform(&v);
    }
    if let Some(v) = file_cfg.default_topic {
        settings.default_topic = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__CHECKOUT_URL") {
        settings.checkout_url = v;
    }
    if let Some(v) = lookup("APP__SHARE_PAGE_URL") {
        settings.share_page_url = v;
    }

    if let Some(v) = lookup("APP__GENERATION_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.generation_delay_ms = parsed,
            Err(_) => warn!(value = %v, "config: ignoring invalid APP__GENERATION_DELAY_MS"),
        }
    }
    if let Some(v) = lookup("APP__CHECKOUT_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.checkout_delay_ms = parsed,
            Err(_) => warn!(value = %v, "config: ignoring invalid APP__CHECKOUT_DELAY_MS"),
        }
    }

    if let Some(v) = lookup("APP__DEFAULT_PLATFORM") {
        settings.default_platform = resolve_platform(&v);
    }
    if let Some(v) = lookup("APP__DEFAULT_TOPIC") {
        settings.default_topic = v;
    }
}

fn validate(settings: &Settings) -> anyhow::Result<()> {
    settings.checkout_config()?;
    Url::parse(&settings.share_page_url)
        .with_context(|| format!("invalid share page url '{}'", settings.share_page_url))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
