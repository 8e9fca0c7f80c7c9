use scraper::{ElementRef, Html, Selector};

use crate::models::Reading;
use crate::plugins::trackers::PriceTracker;
use crate::utils::error::{ConfigError, ParseError};

pub const DEFAULT_TITLE_SELECTOR: &str = "h1";
pub const DEFAULT_PRICE_SELECTOR: &str = "p.price_color";

pub fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Locates the title and price elements of a product page.
#[derive(Debug, Clone)]
pub struct ElementFinder {
    title_selector: Selector,
    price_selector: Selector,
    tracker: PriceTracker,
}

impl ElementFinder {
    pub fn new(
        title_selector: &str,
        price_selector: &str,
        tracker: PriceTracker,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            title_selector: parse_selector(title_selector)?,
            price_selector: parse_selector(price_selector)?,
            tracker,
        })
    }

    pub fn tracker(&self) -> &PriceTracker {
        &self.tracker
    }

    /// Build a [`Reading`] from raw page content. Only the first match of each
    /// selector is considered.
    pub fn extract(&self, html: &str, url: &str) -> Result<Reading, ParseError> {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.title_selector)
            .next()
            .map(element_text)
            .ok_or(ParseError::TitleNotFound)?;

        let price_text = document
            .select(&self.price_selector)
            .next()
            .map(element_text)
            .ok_or(ParseError::PriceNotFound)?;

        let price = self.tracker.parse(&price_text)?;

        Ok(Reading::new(title, price, url))
    }
}

// Each text node trimmed, empty ones dropped, the rest concatenated.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
