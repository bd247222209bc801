use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::UiError;

/// 启动有界面的浏览器（需要人工登录，所以不用无头模式）
pub async fn launch_browser(
    chrome_executable: Option<&str>,
) -> Result<(Browser, Page, JoinHandle<()>), UiError> {
    info!("🚀 启动浏览器...");

    let mut builder = BrowserConfig::builder()
        .with_head()
        .args(vec!["--start-maximized", "--disable-dev-shm-usage"]);

    if let Some(path) = chrome_executable {
        debug!("使用指定的浏览器: {}", path);
        builder = builder.chrome_executable(Path::new(path));
    }

    let config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        UiError::Protocol(format!("配置浏览器失败: {}", e))
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        UiError::from(e)
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        UiError::from(e)
    })?;

    info!("✅ 浏览器已就绪");
    Ok((browser, page, handler_task))
}
