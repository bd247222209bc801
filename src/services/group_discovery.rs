//! 群组发现服务 - 业务能力层
//!
//! 通过"采集 → 加载更多 → 滚动 → 比较高度"的循环收集群组链接

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::UiError;
use crate::infrastructure::PageDriver;
use crate::models::GroupRef;
use crate::services::connectivity::ConnectivityGuard;

/// "加载更多"按钮
pub const LOAD_MORE_BUTTON: &str = r#"//button[.//span[text()="Show more results"]]"#;
/// 已加入群组列表中的群组链接
pub const JOINED_GROUP_LINK: &str = "//a[contains(@class, 'group-listing-item__title-link-')]";
/// 推荐页中的群组卡片链接
pub const SUGGESTED_GROUP_LINK: &str =
    "//a[@class='app-aware-link  discover-entity-type-card__link discover-entity-type-card__link--dash']";

/// 一个群组列表来源
#[derive(Debug, Clone)]
pub struct GroupSource {
    pub name: &'static str,
    pub listing_url: String,
    pub link_xpath: String,
}

impl GroupSource {
    pub fn joined(config: &Config) -> Self {
        Self {
            name: "已加入",
            listing_url: config.joined_groups_url.clone(),
            link_xpath: JOINED_GROUP_LINK.to_string(),
        }
    }

    pub fn suggested(config: &Config) -> Self {
        Self {
            name: "推荐",
            listing_url: config.suggested_groups_url.clone(),
            link_xpath: SUGGESTED_GROUP_LINK.to_string(),
        }
    }
}

/// 采集结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    /// 按首次出现顺序去重后的链接
    pub urls: Vec<String>,
    /// 实际滚动轮数
    pub rounds: usize,
}

pub struct GroupDiscovery {
    joined: GroupSource,
    suggested: GroupSource,
    listing_settle: Duration,
    scroll_settle: Duration,
    between_sources: Duration,
    max_rounds: usize,
}

impl GroupDiscovery {
    pub fn new(config: &Config) -> Self {
        Self {
            joined: GroupSource::joined(config),
            suggested: GroupSource::suggested(config),
            listing_settle: Duration::from_secs(config.listing_settle_secs),
            scroll_settle: Duration::from_secs(config.scroll_settle_secs),
            between_sources: Duration::from_secs(config.between_sources_secs),
            max_rounds: config.max_scroll_rounds,
        }
    }

    /// 采集单个列表页的全部群组链接
    ///
    /// 页面高度不再增长时结束
    pub async fn harvest<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        guard: &ConnectivityGuard,
        source: &GroupSource,
    ) -> Result<Harvest, UiError> {
        guard.wait_until_online().await;
        driver.goto(&source.listing_url).await?;
        sleep(self.listing_settle).await;

        let mut harvest = Harvest::default();
        let mut last_height = driver.scroll_height().await?;

        loop {
            harvest.rounds += 1;

            for url in driver.collect_hrefs(&source.link_xpath).await? {
                if !harvest.urls.contains(&url) {
                    harvest.urls.push(url);
                }
            }

            if driver.exists(LOAD_MORE_BUTTON).await? {
                match driver.click(LOAD_MORE_BUTTON).await {
                    Ok(()) => sleep(self.scroll_settle).await,
                    Err(e) => debug!("点击加载更多失败，继续滚动: {}", e),
                }
            }

            guard.wait_until_online().await;
            driver.scroll_to_bottom().await?;
            sleep(self.scroll_settle).await;

            let new_height = driver.scroll_height().await?;
            if new_height == last_height {
                break;
            }
            last_height = new_height;

            if harvest.rounds >= self.max_rounds {
                warn!("{}群组列表已滚动 {} 轮，停止采集", source.name, harvest.rounds);
                break;
            }
        }

        info!(
            "✓ {}群组采集完成: {} 个 (滚动 {} 轮)",
            source.name,
            harvest.urls.len(),
            harvest.rounds
        );
        Ok(harvest)
    }

    /// 采集已加入与推荐群组，已加入的排在前面
    pub async fn discover_all<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        guard: &ConnectivityGuard,
    ) -> Result<Vec<GroupRef>, UiError> {
        guard.wait_until_online().await;
        let joined = self.harvest(driver, guard, &self.joined).await?;

        sleep(self.between_sources).await;

        let suggested = self.harvest(driver, guard, &self.suggested).await?;

        let groups: Vec<GroupRef> = merge_group_lists(joined.urls, suggested.urls)
            .into_iter()
            .filter_map(|url| {
                let group = GroupRef::from_url(url.as_str());
                if group.is_none() {
                    warn!("无法从地址解析群组 ID，已忽略: {}", url);
                }
                group
            })
            .collect();

        info!("***群组总数*** {}", groups.len());
        Ok(groups)
    }
}

/// 合并两个列表：已加入群组保持原顺序在前，推荐群组中未出现过的依次追加
pub fn merge_group_lists(joined: Vec<String>, suggested: Vec<String>) -> Vec<String> {
    let mut all = joined;
    for url in suggested {
        if !all.contains(&url) {
            all.push(url);
        }
    }
    all
}
