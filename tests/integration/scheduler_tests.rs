use tempfile::TempDir;

use super::*;
use chrono::{Local, NaiveTime, Timelike};
use price_tracker::{DailySchedule, ProductScheduler, SchedulerState};

#[tokio::test]
async fn test_scheduler_single_cycle_against_shop() {
    let server = start_shop(200, product_page("Widget", "£19.99")).await;
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data.json");
    let notifier = RecordingNotifier::default();

    let manager = create_test_manager(product_url(&server), "20.0", &data_file, notifier.clone());
    let schedule = DailySchedule::new(NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    let mut scheduler = ProductScheduler::new(manager, schedule);

    let result = scheduler.run_cycle().await;

    assert!(result.success());
    assert_eq!(scheduler.state(), SchedulerState::Idle);
    assert_eq!(scheduler.run_count(), 1);
    assert_eq!(notifier.sent().len(), 1);
}

#[test]
fn test_next_local_trigger_is_within_a_day() {
    let schedule = DailySchedule::new(NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    let now = Local::now();
    let next = schedule.next_after(&now);

    assert!(next > now);
    assert!(next - now <= chrono::Duration::hours(25));
    assert_eq!((next.hour(), next.minute()), (8, 0));
}
