//! 网络检测服务 - 业务能力层
//!
//! 只负责"等到能上网为止"

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 网络可达性探测
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

/// 通过 HTTP GET 探测
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("无法创建网络探测客户端: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn is_reachable(&self) -> bool {
        match self.client.get(&self.url).send().await {
            Ok(_) => true,
            Err(e) => {
                debug!("网络探测失败: {}", e);
                false
            }
        }
    }
}

/// 网络守卫
///
/// 在状态变更的页面操作前后调用，断网时阻塞并每隔固定时间重试
pub struct ConnectivityGuard {
    probe: Box<dyn ReachabilityProbe>,
    retry_interval: Duration,
}

impl ConnectivityGuard {
    pub fn new(config: &Config) -> AppResult<Self> {
        let probe = HttpProbe::new(
            config.connectivity_url.clone(),
            Duration::from_secs(config.connectivity_timeout_secs),
        )?;
        Ok(Self::with_probe(
            Box::new(probe),
            Duration::from_secs(config.connectivity_retry_secs),
        ))
    }

    pub fn with_probe(probe: Box<dyn ReachabilityProbe>, retry_interval: Duration) -> Self {
        Self {
            probe,
            retry_interval,
        }
    }

    /// 阻塞直到网络可达，返回重试次数
    pub async fn wait_until_online(&self) -> usize {
        let mut retries = 0;
        while !self.probe.is_reachable().await {
            error!("网络未连接，等待中...");
            retries += 1;
            sleep(self.retry_interval).await;
        }
        if retries > 0 {
            info!("网络已恢复");
        }
        retries
    }
}
