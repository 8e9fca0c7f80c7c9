use std::fs;
use tempfile::TempDir;

use super::*;
use price_tracker::storage::{JsonFileStore, ReadingStore};
use price_tracker::AlertOutcome;

#[tokio::test]
async fn test_price_above_threshold_saves_without_alert() {
    let server = start_shop(200, product_page("Widget", "£19.99")).await;
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data.json");
    let notifier = RecordingNotifier::default();

    let manager = create_test_manager(product_url(&server), "10.0", &data_file, notifier.clone());
    let result = manager.check_product().await;

    assert!(result.saved);
    assert_eq!(result.alert, AlertOutcome::NotTriggered);
    assert!(data_file.exists());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_missing_price_keeps_previous_record() {
    let server = start_shop(200, "<html><body><h1>Widget</h1></body></html>".to_string()).await;
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data.json");

    let previous = Reading::new("Widget", dec("24.99"), product_url(&server).as_str());
    JsonFileStore::new(&data_file).save(&previous).unwrap();
    let before = fs::read_to_string(&data_file).unwrap();

    let notifier = RecordingNotifier::default();
    let manager = create_test_manager(product_url(&server), "100", &data_file, notifier.clone());
    let result = manager.check_product().await;

    assert!(!result.success());
    assert_eq!(result.error.as_deref(), Some("Product price not found."));
    assert_eq!(fs::read_to_string(&data_file).unwrap(), before);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_missing_title_writes_nothing() {
    let server = start_shop(
        200,
        r#"<html><body><p class="price_color">£19.99</p></body></html>"#.to_string(),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data.json");
    let notifier = RecordingNotifier::default();

    let manager = create_test_manager(product_url(&server), "100", &data_file, notifier.clone());
    let result = manager.check_product().await;

    assert_eq!(result.error.as_deref(), Some("Product title not found."));
    assert!(!data_file.exists());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_server_error_aborts_cycle() {
    let server = start_shop(500, product_page("Widget", "£1.00")).await;
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data.json");
    let notifier = RecordingNotifier::default();

    let manager = create_test_manager(product_url(&server), "100", &data_file, notifier.clone());
    let result = manager.check_product().await;

    assert!(result.reading.is_none());
    assert!(!data_file.exists());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_unreachable_shop_aborts_cycle() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = url::Url::parse(&format!("http://127.0.0.1:{}{}", port, PRODUCT_PATH)).unwrap();
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data.json");
    let notifier = RecordingNotifier::default();

    let manager = create_test_manager(url, "100", &data_file, notifier.clone());
    let result = manager.check_product().await;

    assert!(result.error.is_some());
    assert!(!data_file.exists());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_unwritable_data_file_still_alerts() {
    let server = start_shop(200, product_page("Widget", "£19.99")).await;
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("missing-dir").join("data.json");
    let notifier = RecordingNotifier::default();

    let manager = create_test_manager(product_url(&server), "20.0", &data_file, notifier.clone());
    let result = manager.check_product().await;

    assert!(result.success());
    assert!(!result.saved);
    assert_eq!(result.alert, AlertOutcome::Sent);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_repeated_cycles_are_idempotent_and_alert_each_time() {
    let server = start_shop(200, product_page("Widget", "£19.99")).await;
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data.json");
    let notifier = RecordingNotifier::default();

    let manager = create_test_manager(product_url(&server), "20.0", &data_file, notifier.clone());

    manager.check_product().await;
    let first = fs::read_to_string(&data_file).unwrap();
    manager.check_product().await;
    let second = fs::read_to_string(&data_file).unwrap();

    assert_eq!(first, second);
    assert_eq!(notifier.sent().len(), 2);
}
