/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::orchestrator::RunStats;

/// 初始化日志：控制台 + 日志文件
///
/// `RUST_LOG` 优先；否则按 `verbose_logging` 选择 debug / info
pub fn init(config: &Config) -> Result<()> {
    init_log_file(&config.output_log_file)?;

    let file = OpenOptions::new()
        .append(true)
        .open(&config.output_log_file)
        .with_context(|| format!("无法打开日志文件: {}", config.output_log_file))?;

    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("日志系统初始化失败")?;

    Ok(())
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n群组投票发布日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 群组投票发布模式");
    info!("📊 本次最多处理 {} 个群组，每组 {} 道题", config.max_groups, config.questions_per_group);
    info!("{}", "=".repeat(60));
}

/// 记录群组发现结果
pub fn log_groups_discovered(total: usize, max_groups: usize) {
    info!("✓ 共发现 {} 个群组", total);
    info!("📋 本次处理前 {} 个\n", total.min(max_groups));
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 本次运行统计
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(stats: &RunStats, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 发布投票: {}", stats.posted);
    info!("📝 新增账本记录: {}", stats.ledger_rows);
    info!("❌ 中止群组: {}/{}", stats.aborted, stats.groups);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
