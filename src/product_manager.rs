use rust_decimal::Decimal;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::element_finder::ElementFinder;
use crate::models::Reading;
use crate::plugins::traits::Notifier;
use crate::scraper::Fetcher;
use crate::storage::ReadingStore;
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertOutcome {
    /// Price above threshold, nothing sent.
    NotTriggered,
    Sent,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductCheckResult {
    pub reading: Option<Reading>,
    pub saved: bool,
    pub alert: AlertOutcome,
    pub error: Option<String>,
    pub total_time_ms: u64,
}

impl ProductCheckResult {
    pub fn success(&self) -> bool {
        self.reading.is_some()
    }
}

/// Runs one fetch, extract, persist, notify cycle for the tracked product.
pub struct ProductManager {
    url: Url,
    threshold: Decimal,
    fetcher: Box<dyn Fetcher>,
    finder: ElementFinder,
    store: Box<dyn ReadingStore>,
    notifier: Box<dyn Notifier>,
}

impl ProductManager {
    pub fn new(
        url: Url,
        threshold: Decimal,
        fetcher: Box<dyn Fetcher>,
        finder: ElementFinder,
        store: Box<dyn ReadingStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            url,
            threshold,
            fetcher,
            finder,
            store,
            notifier,
        }
    }

    pub async fn fetch_reading(&self) -> Result<Reading, AppError> {
        let html = self.fetcher.fetch(&self.url).await?;
        let reading = self.finder.extract(&html, self.url.as_str())?;
        Ok(reading)
    }

    /// Failures are logged here and reported in the result; none of them
    /// escape to the caller.
    pub async fn check_product(&self) -> ProductCheckResult {
        let start_time = Instant::now();

        let reading = match self.fetch_reading().await {
            Ok(reading) => reading,
            Err(e) => {
                error!("Failed to fetch product data: {}", e);
                warn!("Product data not fetched. Skipping save.");
                return ProductCheckResult {
                    reading: None,
                    saved: false,
                    alert: AlertOutcome::NotTriggered,
                    error: Some(e.to_string()),
                    total_time_ms: start_time.elapsed().as_millis() as u64,
                };
            }
        };

        let tracker = self.finder.tracker();
        info!(
            "Current price of '{}': {}",
            reading.title,
            tracker.format(reading.price)
        );

        let saved = match self.store.save(&reading) {
            Ok(()) => {
                info!("Reading saved.");
                true
            }
            Err(e) => {
                error!("Failed to save data: {}", e);
                false
            }
        };

        let alert = if reading.is_at_or_below(self.threshold) {
            debug!(
                "Price {} is at or below threshold {}",
                tracker.format(reading.price),
                tracker.format(self.threshold)
            );
            match self.notifier.notify(&reading).await {
                Ok(()) => {
                    info!(status = "success", "Email alert sent!");
                    AlertOutcome::Sent
                }
                Err(e) => {
                    error!("Failed to send email: {}", e);
                    AlertOutcome::Failed(e.to_string())
                }
            }
        } else {
            AlertOutcome::NotTriggered
        };

        ProductCheckResult {
            reading: Some(reading),
            saved,
            alert,
            error: None,
            total_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}
