use rust_decimal::Decimal;
use std::str::FromStr;

use crate::utils::error::ParseError;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

/// Turns the text of a price element into a number.
#[derive(Debug, Clone)]
pub struct PriceTracker {
    currency_symbol: String,
}

impl Default for PriceTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}

impl PriceTracker {
    pub fn new(currency_symbol: &str) -> Self {
        PriceTracker {
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Strip the currency glyph and parse what remains, e.g. `£19.99` -> `19.99`.
    pub fn parse(&self, text: &str) -> Result<Decimal, ParseError> {
        let stripped = text.replace(self.currency_symbol.as_str(), "");
        let number = stripped.trim();

        Decimal::from_str(number)
            .or_else(|_| Decimal::from_scientific(number))
            .map_err(|_| ParseError::InvalidPrice {
                text: text.to_string(),
            })
    }

    pub fn format(&self, price: Decimal) -> String {
        format!("{}{}", self.currency_symbol, price)
    }
}
