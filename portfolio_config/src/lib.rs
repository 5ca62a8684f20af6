use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use portfolio_models::email_address::EmailAddressWithName;
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files. Later files override earlier ones.
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG";

/// Load the config files listed in `PORTFOLIO_CONFIG`, falling back to the
/// default config shipped with the repository.
pub fn load() -> anyhow::Result<Config> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(paths) => load_paths(&paths.split(':').collect::<Vec<_>>()),
        Err(std::env::VarError::NotPresent) => load_paths(&[DEFAULT_CONFIG_PATH]),
        Err(err) => Err(err).with_context(|| format!("Failed to read {CONFIG_PATH_ENV}")),
    }
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Where contact form messages are delivered to
    pub recipient: EmailAddressWithName,
    pub subject_prefix: String,
    pub delivery_timeout: Duration,
}
