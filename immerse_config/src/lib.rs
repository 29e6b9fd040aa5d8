use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use immerse_models::{email_address::EmailAddress, Sensitive};
use serde::Deserialize;

pub use self::duration::Duration;

mod duration;

pub const DEFAULT_CONFIG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml"));

/// Colon separated list of additional config files, applied in order.
pub const CONFIG_PATHS_VAR: &str = "IMMERSE_CONFIG";

/// Environment variables that override single config keys.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_USER", "smtp.username"),
    ("SMTP_PASSWORD", "smtp.password"),
    ("SMTP_FROM_EMAIL", "smtp.from"),
    ("CONTACT_RECIPIENT_EMAIL", "contact.recipient"),
];

/// Load the config from the built-in defaults, the files listed in
/// `IMMERSE_CONFIG` and the environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_VAR).unwrap_or_default();
    let paths = paths.split(':').filter(|path| !path.is_empty());
    let overrides = env_overrides(|var| std::env::var(var).ok());
    load_from(paths, overrides)
}

pub fn load_from(
    paths: impl IntoIterator<Item = impl AsRef<Path>>,
    overrides: impl IntoIterator<Item = (&'static str, String)>,
) -> anyhow::Result<Config> {
    let builder = config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.into_iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    overrides
        .into_iter()
        .try_fold(builder, |builder, (key, value)| {
            builder
                .set_override(key, value)
                .with_context(|| format!("Failed to override {key}"))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Collect the overrides from [`ENV_OVERRIDES`]. Empty values count as unset.
pub fn env_overrides(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, String)> {
    ENV_OVERRIDES
        .iter()
        .filter_map(|&(var, key)| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (key, value))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

#[derive(Debug, Default, Deserialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub from: Option<EmailAddress>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    pub recipient: Option<EmailAddress>,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
