//! 条件等待

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::UiError;
use crate::infrastructure::page_driver::PageDriver;

/// 轮询等待元素出现，超时返回 `UiError::Timeout`
pub async fn wait_for_element<D: PageDriver + ?Sized>(
    driver: &D,
    xpath: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), UiError> {
    let deadline = Instant::now() + timeout;

    loop {
        if driver.exists(xpath).await? {
            debug!("元素已出现: {}", xpath);
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(UiError::Timeout {
                locator: xpath.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
        sleep(poll_interval).await;
    }
}
