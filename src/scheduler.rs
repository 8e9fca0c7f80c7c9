use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::product_manager::{ProductCheckResult, ProductManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// One trigger per calendar day at a fixed wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    at: NaiveTime,
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    /// The first trigger strictly after `now`. Days on which the trigger time
    /// does not exist locally (DST gap) are skipped.
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let tz = now.timezone();
        let today = now.date_naive();

        let mut offset = 0;
        loop {
            let candidate = today
                .checked_add_days(Days::new(offset))
                .map(|day| day.and_time(self.at))
                .and_then(|naive| tz.from_local_datetime(&naive).earliest());

            if let Some(trigger) = candidate {
                if trigger > *now {
                    return trigger;
                }
            }
            offset += 1;
        }
    }

    /// Every trigger after `start`, each one chained from the previous trigger
    /// rather than from whenever the previous check finished.
    pub fn triggers_from<Tz: TimeZone>(&self, start: DateTime<Tz>) -> Triggers<Tz> {
        Triggers {
            schedule: *self,
            last: start,
        }
    }
}

/// Unbounded sequence of daily triggers, see [`DailySchedule::triggers_from`].
#[derive(Debug, Clone)]
pub struct Triggers<Tz: TimeZone> {
    schedule: DailySchedule,
    last: DateTime<Tz>,
}

impl<Tz: TimeZone> Iterator for Triggers<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.schedule.next_after(&self.last);
        self.last = next.clone();
        Some(next)
    }
}

/// Time left until `trigger`, zero once it has passed.
pub fn wait_until<Tz: TimeZone>(trigger: &DateTime<Tz>, now: &DateTime<Tz>) -> Duration {
    trigger
        .clone()
        .signed_duration_since(now.clone())
        .to_std()
        .unwrap_or(Duration::ZERO)
}

pub struct ProductScheduler {
    manager: ProductManager,
    schedule: DailySchedule,
    state: SchedulerState,
    run_count: u64,
    last_run: Option<DateTime<Local>>,
}

impl ProductScheduler {
    pub fn new(manager: ProductManager, schedule: DailySchedule) -> Self {
        Self {
            manager,
            schedule,
            state: SchedulerState::Idle,
            run_count: 0,
            last_run: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn run_count(&self) -> u64 {
        self.run_count
    }

    pub fn last_run(&self) -> Option<DateTime<Local>> {
        self.last_run
    }

    /// Execute a single check, outside of the daily schedule.
    pub async fn run_cycle(&mut self) -> ProductCheckResult {
        self.state = SchedulerState::Running;
        self.last_run = Some(Local::now());
        tracing::debug!("Starting check #{}", self.run_count + 1);

        let result = self.manager.check_product().await;

        self.run_count += 1;
        self.state = SchedulerState::Idle;
        tracing::debug!("Check finished in {} ms", result.total_time_ms);
        result
    }

    /// One immediate check, then one per day at the scheduled time. Never returns.
    pub async fn run_forever(&mut self) {
        self.run_scheduled(Local::now, None).await;
    }

    /// One immediate check, then one per trigger, reading wall-clock time
    /// from `clock`. With `limit` set, returns after that many scheduled
    /// checks.
    pub async fn run_scheduled<Tz, C>(&mut self, clock: C, limit: Option<usize>)
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
        C: Fn() -> DateTime<Tz>,
    {
        // Triggers are anchored before the first check so a slow first check
        // cannot push today's trigger into the past and lose it.
        let started = clock();
        self.run_cycle().await;

        let triggers = self.schedule.triggers_from(started);
        for next in triggers.take(limit.unwrap_or(usize::MAX)) {
            tracing::info!("Next check scheduled for {}", next.format("%Y-%m-%d %H:%M"));

            tokio::time::sleep(wait_until(&next, &clock())).await;
            self.run_cycle().await;
        }
    }
}
