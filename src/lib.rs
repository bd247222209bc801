//! # Group Poll Submit
//!
//! 一个用于向 LinkedIn 群组自动发布投票的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动或连接浏览器，`BrowserSession` 是唯一的 Browser 持有者
//! - `infrastructure/` - `PageDriver` 页面能力、`JsExecutor`、条件等待
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `ConnectivityGuard` - 等待网络
//! - `SessionStore` - Cookie 读写
//! - `Ledger` - 发布记录账本
//! - `GroupDiscovery` - 滚动采集群组
//! - `PollComposer` - 在页面上填写并发布一个投票
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个群组"的完整处理流程
//! - `PollCtx` - 上下文封装（群组 + 序号）
//! - `PollFlow` - 流程编排（抽题 → 校验 → 查账本 → 发布）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/run_driver` - 登录、发现群组、逐组调度、写账本
//! - `orchestrator/pacer` - 节流
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::BrowserSession;
pub use config::Config;
pub use error::{AppError, AppResult, UiError, ValidationError};
pub use infrastructure::{ChromiumDriver, JsExecutor, PageDriver, StoredCookie};
pub use models::{GroupRef, LedgerEntry, PollQuestion, QuestionBlock};
pub use orchestrator::{post_to_groups, App, Pacer, RunStats};
pub use workflow::{GroupOutcome, PollCtx, PollFlow};
