use async_trait::async_trait;

use crate::models::Reading;
use crate::utils::error::NotifyError;

/// Delivers a price alert for a reading that crossed the threshold.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, reading: &Reading) -> Result<(), NotifyError>;
}
