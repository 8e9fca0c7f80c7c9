use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The most recent successful observation of the tracked product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reading {
    pub title: String,
    pub price: Decimal,
    pub url: String,
}

impl Reading {
    pub fn new(title: impl Into<String>, price: Decimal, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            url: url.into(),
        }
    }

    /// True when the price has reached the alert threshold.
    pub fn is_at_or_below(&self, threshold: Decimal) -> bool {
        self.price <= threshold
    }
}
