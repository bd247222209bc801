//! chromiumoxide 实现的页面驱动

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::element::Element;
use tracing::debug;

use crate::error::UiError;
use crate::infrastructure::js_executor::JsExecutor;
use crate::infrastructure::page_driver::{PageDriver, StoredCookie};

/// 基于 CDP 的页面驱动
///
/// 查询类操作走 JS（XPath → document.evaluate），
/// 点击和输入走 CDP 原生事件，保证页面框架能收到真实的键盘鼠标事件。
pub struct ChromiumDriver {
    executor: JsExecutor,
}

impl ChromiumDriver {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    async fn find(&self, xpath: &str) -> Result<Element, UiError> {
        self.executor
            .page()
            .find_xpath(xpath)
            .await
            .map_err(|e| {
                debug!("查找元素失败 {}: {}", xpath, e);
                UiError::NotFound {
                    locator: xpath.to_string(),
                }
            })
    }
}

fn js_string(value: &str) -> Result<String, UiError> {
    Ok(serde_json::to_string(value)?)
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn goto(&self, url: &str) -> Result<(), UiError> {
        debug!("导航到: {}", url);
        self.executor.page().goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, UiError> {
        Ok(self.executor.page().url().await?.unwrap_or_default())
    }

    async fn reload(&self) -> Result<(), UiError> {
        self.executor.page().reload().await?;
        Ok(())
    }

    async fn exists(&self, xpath: &str) -> Result<bool, UiError> {
        let js = format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue !== null",
            js_string(xpath)?
        );
        self.executor.eval_as(js).await
    }

    async fn click(&self, xpath: &str) -> Result<(), UiError> {
        self.find(xpath).await?.click().await?;
        Ok(())
    }

    async fn type_into(&self, xpath: &str, text: &str) -> Result<(), UiError> {
        let element = self.find(xpath).await?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    async fn attribute(&self, xpath: &str, name: &str) -> Result<Option<String>, UiError> {
        Ok(self.find(xpath).await?.attribute(name).await?)
    }

    async fn collect_hrefs(&self, xpath: &str) -> Result<Vec<String>, UiError> {
        let js = format!(
            r#"
            (() => {{
                const snapshot = document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
                const hrefs = [];
                for (let i = 0; i < snapshot.snapshotLength; i++) {{
                    const node = snapshot.snapshotItem(i);
                    if (node && node.href) {{
                        hrefs.push(node.href);
                    }}
                }}
                return hrefs;
            }})()
            "#,
            js_string(xpath)?
        );
        self.executor.eval_as(js).await
    }

    async fn scroll_height(&self) -> Result<i64, UiError> {
        self.executor.eval_as("document.body.scrollHeight").await
    }

    async fn scroll_to_bottom(&self) -> Result<(), UiError> {
        self.executor
            .eval("(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()")
            .await?;
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<StoredCookie>, UiError> {
        let cookies = self.executor.page().get_cookies().await?;
        Ok(cookies
            .into_iter()
            .map(|c| StoredCookie {
                name: c.name,
                value: c.value,
                domain: c.domain,
                path: c.path,
                secure: c.secure,
                http_only: c.http_only,
            })
            .collect())
    }

    async fn set_cookies(&self, cookies: Vec<StoredCookie>) -> Result<(), UiError> {
        let params = cookies
            .into_iter()
            .map(|c| {
                CookieParam::builder()
                    .name(c.name)
                    .value(c.value)
                    .domain(c.domain)
                    .path(c.path)
                    .secure(c.secure)
                    .http_only(c.http_only)
                    .build()
                    .map_err(UiError::Protocol)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.executor.page().set_cookies(params).await?;
        Ok(())
    }
}
