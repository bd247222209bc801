use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器交互错误
    #[error("浏览器错误: {0}")]
    Ui(#[from] UiError),
    /// 题库文件不存在（致命，无法继续）
    #[error("题库文件不存在: {}", path.display())]
    QuestionBankMissing { path: PathBuf },
    /// 文件读写错误
    #[error("文件错误 ({}): {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 登录态文件无法解析；该文件不会被自动覆盖，需要手动删除
    #[error("登录态文件已损坏 ({}): {source}，请删除该文件后重新登录", path.display())]
    SessionFileCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

/// 浏览器交互错误
///
/// 任意一种都会让当前群组整体中止
#[derive(Debug, Error)]
pub enum UiError {
    /// 元素不存在
    #[error("未找到元素: {locator}")]
    NotFound { locator: String },
    /// 等待元素超时
    #[error("等待元素超时 ({timeout_secs}秒): {locator}")]
    Timeout { locator: String, timeout_secs: u64 },
    /// CDP 协议层失败（包括点击被遮挡、导航失败等）
    #[error("浏览器协议错误: {0}")]
    Protocol(String),
}

/// 题目校验错误
///
/// 只让当前题目被跳过，不会向上传播
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 题干超长
    #[error("题干长度 {len} 超过上限 {max}")]
    QuestionTooLong { len: usize, max: usize },
    /// 选项超长
    #[error("选项 '{option}' 长度 {len} 超过上限 {max}")]
    OptionTooLong {
        option: String,
        len: usize,
        max: usize,
    },
    /// 选项数量不足
    #[error("选项数量 {count} 少于 {min}")]
    TooFewOptions { count: usize, min: usize },
}

impl From<chromiumoxide::error::CdpError> for UiError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        UiError::Protocol(err.to_string())
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Protocol(format!("脚本返回值无法解析: {}", err))
    }
}

impl AppError {
    /// 创建文件读写错误
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
