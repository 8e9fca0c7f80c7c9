use chrono::NaiveTime;
use config::{Config, Environment, Map};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::element_finder::{parse_selector, DEFAULT_PRICE_SELECTOR, DEFAULT_TITLE_SELECTOR};
use crate::plugins::trackers::price::DEFAULT_CURRENCY_SYMBOL;
use crate::scraper::DEFAULT_USER_AGENT;
use crate::storage::DEFAULT_DATA_FILE;
use crate::utils::error::ConfigError;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// 08:00 local time.
pub fn default_check_time() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tracker: TrackerConfig,
    pub smtp: SmtpConfig,
    pub scheduler: SchedulerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub product_url: Url,
    pub price_threshold: Decimal,
    pub currency_symbol: String,
    pub title_selector: String,
    pub price_selector: String,
    pub user_agent: String,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub to_address: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("to_address", &self.to_address)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Local wall-clock time of the daily check.
    pub check_time: NaiveTime,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

/// Environment keys as read by the `config` crate (lowercased).
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    product_url: Option<String>,
    price_threshold: Option<String>,
    email_user: Option<String>,
    email_pass: Option<String>,
    email_to: Option<String>,
    check_time: Option<String>,
    data_file: Option<String>,
    currency_symbol: Option<String>,
    title_selector: Option<String>,
    price_selector: Option<String>,
    smtp_host: Option<String>,
    smtp_port: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Read from the process environment. Call `dotenvy` first if a `.env`
    /// file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    /// Same as [`AppConfig::from_env`] but reading the given key/value pairs
    /// instead of the process environment.
    pub fn from_map(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default().source(Some(vars)))
    }

    fn from_environment(source: Environment) -> Result<Self, ConfigError> {
        let raw: RawSettings = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        let config = Self::from_raw(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let required = [
            ("PRODUCT_URL", present(raw.product_url)),
            ("PRICE_THRESHOLD", present(raw.price_threshold)),
            ("EMAIL_USER", present(raw.email_user)),
            ("EMAIL_PASS", present(raw.email_pass)),
            ("EMAIL_TO", present(raw.email_to)),
        ];

        let missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing { keys: missing });
        }

        let [url, threshold, username, password, to_address] =
            required.map(|(_, value)| value.unwrap_or_default());

        let price_threshold = parse_threshold(&threshold)?;
        let product_url = Url::parse(url.trim())?;

        let check_time = match present(raw.check_time) {
            Some(value) => NaiveTime::parse_from_str(value.trim(), "%H:%M")
                .map_err(|_| ConfigError::InvalidCheckTime { value })?,
            None => default_check_time(),
        };

        let port = match present(raw.smtp_port) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(AppConfig {
            tracker: TrackerConfig {
                product_url,
                price_threshold,
                currency_symbol: raw
                    .currency_symbol
                    .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
                title_selector: present(raw.title_selector)
                    .unwrap_or_else(|| DEFAULT_TITLE_SELECTOR.to_string()),
                price_selector: present(raw.price_selector)
                    .unwrap_or_else(|| DEFAULT_PRICE_SELECTOR.to_string()),
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            smtp: SmtpConfig {
                host: present(raw.smtp_host).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port,
                username,
                password,
                to_address,
            },
            scheduler: SchedulerConfig { check_time },
            storage: StorageConfig {
                data_file: present(raw.data_file)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            },
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp.port == 0 {
            return Err(ConfigError::Validation("SMTP port must be greater than 0".into()));
        }

        if self.tracker.currency_symbol.is_empty() {
            return Err(ConfigError::Validation("Currency symbol must not be empty".into()));
        }

        parse_selector(&self.tracker.title_selector)?;
        parse_selector(&self.tracker.price_selector)?;

        Ok(())
    }
}

// Decimal has no infinities or NaN, so "inf"/"nan" and magnitudes beyond
// its range are rejected along with non-numeric text.
fn parse_threshold(value: &str) -> Result<Decimal, ConfigError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ConfigError::InvalidThreshold {
            value: value.to_string(),
        })
}
