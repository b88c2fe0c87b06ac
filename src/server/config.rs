use std::path::PathBuf;

use config::{Config as Cfg, Environment, File};
use serde::Deserialize;

use super::error::AppError;
use crate::core::TaxRates;
use crate::words::WordScale;

/// Service configuration.
///
/// Sources, later ones winning: built-in defaults, an optional `bijak.toml`
/// in the working directory, then `APP__*` environment variables
/// (`APP__PORT=5000`, `APP__TAX__STANDARD_RATE=12`). A `.env` file is
/// loaded first when present.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Prefix of the URLs handed back to clients.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Where generated PDFs are written and served from.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Where uploaded signature images are kept.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Frontend origin allowed by CORS.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Optional JPEG logo drawn on every invoice.
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub tax: TaxRates,
    #[serde(default)]
    pub words: WordsConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WordsConfig {
    #[serde(default)]
    pub scale: WordScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_public_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("invoices")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: default_public_base_url(),
            output_dir: default_output_dir(),
            upload_dir: default_upload_dir(),
            cors_origin: default_cors_origin(),
            logo_path: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            max_upload_bytes: default_max_upload_bytes(),
            tax: TaxRates::default(),
            words: WordsConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("bijak").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break invoice arithmetic.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.tax.is_valid() {
            return Err(AppError::ConfigError(format!(
                "tax.standard_rate must be between 0 and 100, got {}",
                self.tax.standard_rate
            )));
        }
        Ok(())
    }

    /// URL under which a generated invoice is served.
    pub fn invoice_url(&self, file_name: &str) -> String {
        format!(
            "{}/invoices/{}",
            self.public_base_url.trim_end_matches('/'),
            file_name
        )
    }
}
