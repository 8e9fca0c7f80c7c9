use std::path::PathBuf;

use thiserror::Error;

/// Startup failures. The only class of error that stops the process.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing one or more required environment variables: {}. Check your .env file.", .keys.join(", "))]
    Missing { keys: Vec<String> },

    #[error("PRICE_THRESHOLD must be a numeric value, got {value:?}")]
    InvalidThreshold { value: String },

    #[error("PRODUCT_URL is not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("CHECK_TIME must be formatted as HH:MM, got {value:?}")]
    InvalidCheckTime { value: String },

    #[error("SMTP_PORT must be a port number, got {value:?}")]
    InvalidPort { value: String },

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Configuration error: {0}")]
    Validation(String),

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Product title not found.")]
    TitleNotFound,

    #[error("Product price not found.")]
    PriceNotFound,

    #[error("Price text {text:?} is not a number")]
    InvalidPrice { text: String },
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
