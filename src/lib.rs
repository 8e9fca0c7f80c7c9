pub mod config;
pub mod element_finder;
pub mod models;
pub mod plugins;
pub mod product_manager;
pub mod scheduler;
pub mod scraper;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::models::Reading;
pub use crate::product_manager::{AlertOutcome, ProductCheckResult, ProductManager};
pub use crate::scheduler::{DailySchedule, ProductScheduler, SchedulerState};
pub use crate::utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Wire the production components together from a loaded configuration.
pub fn build_manager(config: &AppConfig) -> Result<ProductManager> {
    use crate::element_finder::ElementFinder;
    use crate::plugins::notifiers::EmailNotifier;
    use crate::plugins::trackers::PriceTracker;
    use crate::scraper::HttpFetcher;
    use crate::storage::JsonFileStore;

    let tracker = PriceTracker::new(&config.tracker.currency_symbol);
    let finder = ElementFinder::new(
        &config.tracker.title_selector,
        &config.tracker.price_selector,
        tracker.clone(),
    )?;

    Ok(ProductManager::new(
        config.tracker.product_url.clone(),
        config.tracker.price_threshold,
        Box::new(HttpFetcher::new(&config.tracker.user_agent)?),
        finder,
        Box::new(JsonFileStore::new(config.storage.data_file.clone())),
        Box::new(EmailNotifier::new(config.smtp.clone(), tracker)),
    ))
}
