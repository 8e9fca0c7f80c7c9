// Shared fixtures for the integration tests

pub mod price_check_tests;
pub mod scheduler_tests;

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use price_tracker::element_finder::{ElementFinder, DEFAULT_PRICE_SELECTOR, DEFAULT_TITLE_SELECTOR};
use price_tracker::plugins::trackers::PriceTracker;
use price_tracker::plugins::traits::Notifier;
use price_tracker::scraper::{HttpFetcher, DEFAULT_USER_AGENT};
use price_tracker::storage::JsonFileStore;
use price_tracker::utils::error::NotifyError;
use price_tracker::{ProductManager, Reading};

pub const PRODUCT_PATH: &str = "/catalogue/widget.html";

pub fn product_page(title: &str, price: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en-gb">
<head><title>{title} | Books to Scrape</title></head>
<body>
  <div class="col-sm-6 product_main">
    <h1>{title}</h1>
    <p class="price_color">{price}</p>
    <p class="instock availability">In stock</p>
  </div>
</body>
</html>"#
    )
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Serve `body` for the product path with the given status.
pub async fn start_shop(status: u16, body: String) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_PATH))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

pub fn product_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}{}", server.uri(), PRODUCT_PATH)).unwrap()
}

/// Notifier that records what it was asked to send.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<Reading>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Reading> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, reading: &Reading) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(reading.clone());
        Ok(())
    }
}

pub fn create_test_manager(
    url: Url,
    threshold: &str,
    data_file: &Path,
    notifier: RecordingNotifier,
) -> ProductManager {
    ProductManager::new(
        url,
        dec(threshold),
        Box::new(HttpFetcher::new(DEFAULT_USER_AGENT).unwrap()),
        ElementFinder::new(DEFAULT_TITLE_SELECTOR, DEFAULT_PRICE_SELECTOR, PriceTracker::default())
            .unwrap(),
        Box::new(JsonFileStore::new(data_file)),
        Box::new(notifier),
    )
}
