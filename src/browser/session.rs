//! 浏览器会话 - 唯一持有 Browser 的资源

use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::browser::{connect_to_browser_and_page, launch_browser};
use crate::config::Config;
use crate::error::UiError;

/// 浏览器会话
///
/// 打开方式决定关闭方式：自己启动的浏览器在 `close` 时退出，
/// 连接的外部浏览器只断开连接。`Drop` 时终止事件处理任务。
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    owned: bool,
}

impl BrowserSession {
    /// 按配置启动或连接浏览器
    pub async fn open(config: &Config) -> Result<Self, UiError> {
        let (browser, page, handler_task, owned) = match config.browser_debug_port {
            Some(port) => {
                let (b, p, h) = connect_to_browser_and_page(port, Some("linkedin.com")).await?;
                (b, p, h, false)
            }
            None => {
                let (b, p, h) = launch_browser(config.chrome_executable.as_deref()).await?;
                (b, p, h, true)
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
            owned,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 关闭会话
    pub async fn close(&mut self) {
        if !self.owned {
            info!("断开与浏览器的连接");
            return;
        }

        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
            return;
        }
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器退出失败: {}", e);
        }
        info!("浏览器已关闭");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
