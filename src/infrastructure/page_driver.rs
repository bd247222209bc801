//! 页面驱动能力 - 基础设施层
//!
//! 业务代码只依赖这个 trait，不直接接触 chromiumoxide。
//! 所有定位器均为 XPath。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::UiError;

/// 持久化的 Cookie 记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

fn default_path() -> String {
    "/".to_string()
}

/// 浏览器页面能力
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 导航到指定地址
    async fn goto(&self, url: &str) -> Result<(), UiError>;

    /// 当前页面地址
    async fn current_url(&self) -> Result<String, UiError>;

    /// 刷新页面
    async fn reload(&self) -> Result<(), UiError>;

    /// 元素当前是否存在
    async fn exists(&self, xpath: &str) -> Result<bool, UiError>;

    /// 点击第一个匹配元素，不存在时返回 NotFound
    async fn click(&self, xpath: &str) -> Result<(), UiError>;

    /// 向第一个匹配元素输入文本
    async fn type_into(&self, xpath: &str, text: &str) -> Result<(), UiError>;

    /// 读取第一个匹配元素的属性
    async fn attribute(&self, xpath: &str, name: &str) -> Result<Option<String>, UiError>;

    /// 收集所有匹配链接的绝对 href（按文档顺序）
    async fn collect_hrefs(&self, xpath: &str) -> Result<Vec<String>, UiError>;

    /// document.body.scrollHeight
    async fn scroll_height(&self) -> Result<i64, UiError>;

    /// 滚动到页面底部
    async fn scroll_to_bottom(&self) -> Result<(), UiError>;

    /// 当前页面的全部 Cookie
    async fn cookies(&self) -> Result<Vec<StoredCookie>, UiError>;

    /// 写入 Cookie
    async fn set_cookies(&self, cookies: Vec<StoredCookie>) -> Result<(), UiError>;
}
