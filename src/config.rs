use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "poll_config.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 浏览器调试端口（设置后连接已有浏览器，否则启动新浏览器）
    pub browser_debug_port: Option<u16>,
    /// Chrome 可执行文件路径
    pub chrome_executable: Option<String>,

    // --- 站点地址 ---
    pub home_url: String,
    pub login_url: String,
    /// 已登录时首页地址中包含的标记
    pub feed_marker: String,
    pub joined_groups_url: String,
    pub suggested_groups_url: String,

    // --- 文件 ---
    pub question_bank_file: String,
    pub cookies_file: String,
    pub ledger_file: String,
    pub output_log_file: String,

    // --- 数量限制 ---
    /// 每次运行处理的群组数量
    pub max_groups: usize,
    /// 每个群组抽取的题目数量
    pub questions_per_group: usize,
    /// 滚动采集的最大轮数
    pub max_scroll_rounds: usize,

    // --- 网络检测 ---
    pub connectivity_url: String,
    pub connectivity_timeout_secs: u64,
    pub connectivity_retry_secs: u64,

    // --- 等待与延时（秒） ---
    /// 等待元素出现的超时
    pub element_timeout_secs: u64,
    pub element_poll_millis: u64,
    pub group_page_settle_secs: u64,
    pub listing_settle_secs: u64,
    pub scroll_settle_secs: u64,
    pub step_settle_secs: u64,
    pub post_settle_secs: u64,
    pub between_sources_secs: u64,
    pub after_login_settle_secs: u64,

    // --- 节流 ---
    pub pacing_window_secs: u64,
    pub pacing_pause_secs: u64,
    /// 每个群组之后随机等待的上限
    pub max_group_jitter_secs: u64,

    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: None,
            chrome_executable: None,
            home_url: "https://www.linkedin.com".to_string(),
            login_url: "https://www.linkedin.com/login".to_string(),
            feed_marker: "feed".to_string(),
            joined_groups_url: "https://www.linkedin.com/groups/followed".to_string(),
            suggested_groups_url: "https://www.linkedin.com/mynetwork/discovery-see-all/?reasons=List((sourceType%3AGROUP_COHORT%2CreasonContext%3AGROUP_COHORT))".to_string(),
            question_bank_file: "polls.txt".to_string(),
            cookies_file: "cookies.json".to_string(),
            ledger_file: "output.csv".to_string(),
            output_log_file: "output.txt".to_string(),
            max_groups: 3,
            questions_per_group: 3,
            max_scroll_rounds: 200,
            connectivity_url: "http://www.google.com/".to_string(),
            connectivity_timeout_secs: 5,
            connectivity_retry_secs: 5,
            element_timeout_secs: 10,
            element_poll_millis: 250,
            group_page_settle_secs: 10,
            listing_settle_secs: 5,
            scroll_settle_secs: 2,
            step_settle_secs: 2,
            post_settle_secs: 7,
            between_sources_secs: 6,
            after_login_settle_secs: 5,
            pacing_window_secs: 3600,
            pacing_pause_secs: 600,
            max_group_jitter_secs: 40,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认值 ← 配置文件 ← 环境变量
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("POLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AppError::file(path, e))?;
        Self::from_toml_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    fn with_env_overrides(self) -> Self {
        Self {
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").or(self.browser_debug_port),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(self.chrome_executable),
            question_bank_file: std::env::var("POLL_FILE").unwrap_or(self.question_bank_file),
            cookies_file: std::env::var("COOKIES_FILE").unwrap_or(self.cookies_file),
            ledger_file: std::env::var("CSV_FILE").unwrap_or(self.ledger_file),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            max_groups: env_parse("MAX_GROUPS").unwrap_or(self.max_groups),
            questions_per_group: env_parse("QUESTIONS_PER_GROUP").unwrap_or(self.questions_per_group),
            element_timeout_secs: env_parse("ELEMENT_TIMEOUT_SECS").unwrap_or(self.element_timeout_secs),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            ..self
        }
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }

    pub fn element_poll_interval(&self) -> Duration {
        Duration::from_millis(self.element_poll_millis)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
