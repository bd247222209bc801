//! 节流器
//!
//! 连续运行超过时间窗口后长暂停一次并重新计时；每个群组之后随机短暂停。

use std::time::Duration;

use rand::Rng;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::config::Config;

pub struct Pacer {
    window: Duration,
    long_pause: Duration,
    max_jitter_secs: u64,
    started: Instant,
}

impl Pacer {
    pub fn new(config: &Config) -> Self {
        Self::with_limits(
            Duration::from_secs(config.pacing_window_secs),
            Duration::from_secs(config.pacing_pause_secs),
            config.max_group_jitter_secs,
        )
    }

    pub fn with_limits(window: Duration, long_pause: Duration, max_jitter_secs: u64) -> Self {
        Self {
            window,
            long_pause,
            max_jitter_secs,
            started: Instant::now(),
        }
    }

    /// 从开始或上次长暂停结束到现在的时间
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// 超过时间窗口时长暂停并重新计时，返回是否暂停过
    pub async fn throttle(&mut self) -> bool {
        if self.started.elapsed() <= self.window {
            return false;
        }

        info!("⏸️ 已连续运行超过 {} 分钟，暂停 {} 分钟", self.window.as_secs() / 60, self.long_pause.as_secs() / 60);
        sleep(self.long_pause).await;
        self.started = Instant::now();
        true
    }

    /// 随机等待 0..=上限 秒，返回实际等待时长
    pub async fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let delay = Duration::from_secs(rng.gen_range(0..=self.max_jitter_secs));
        debug!("随机等待 {} 秒", delay.as_secs());
        sleep(delay).await;
        delay
    }
}
