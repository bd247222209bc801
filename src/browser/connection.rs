use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::UiError;

/// 连接到已开启调试端口的浏览器并获取页面
///
/// 优先复用地址中包含 `url_marker` 的标签页，找不到时新建空白页
pub async fn connect_to_browser_and_page(
    port: u16,
    url_marker: Option<&str>,
) -> Result<(Browser, Page, JoinHandle<()>), UiError> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        UiError::from(e)
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    if let Some(marker) = url_marker {
        for p in pages.iter() {
            if let Ok(Some(url)) = p.url().await {
                debug!("检查页面地址: {}", url);
                if url.contains(marker) {
                    info!("✓ 复用已有页面: {}", url);
                    return Ok((browser, p.clone(), handler_task));
                }
            }
        }
        debug!("未找到匹配的页面，将创建新页面");
    }

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建空白页面失败: {}", e);
        UiError::from(e)
    })?;

    Ok((browser, page, handler_task))
}
