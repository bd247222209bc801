//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `run_driver` - 运行驱动
//! - 管理应用生命周期（初始化、运行、关闭浏览器）
//! - 登录、群组发现
//! - `post_to_groups`：逐组调度（与具体浏览器无关，可用任意 `PageDriver`）
//! - 写账本、输出全局统计
//!
//! ### `pacer` - 节流器
//! - 一小时长暂停
//! - 每组随机短暂停
//!
//! ## 层次关系
//!
//! ```text
//! run_driver (处理 Vec<GroupRef>)
//!     ↓
//! workflow::PollFlow (处理单个群组)
//!     ↓
//! services (能力层：connectivity / session / ledger / discovery / composer)
//!     ↓
//! infrastructure (基础设施：PageDriver / JsExecutor)
//! ```

pub mod pacer;
pub mod run_driver;

pub use pacer::Pacer;
pub use run_driver::{post_to_groups, App, RunStats};
