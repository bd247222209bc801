//! 运行驱动 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整运行和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：打开浏览器会话、创建各项服务
//! 2. **登录**：恢复 Cookie，未登录时等待人工登录并保存登录态
//! 3. **群组发现**：采集已加入和推荐的群组
//! 4. **逐组发布**：只处理前 N 个群组，成功的投票写入账本
//! 5. **节流**：超过一小时长暂停，每组之后随机短暂停
//! 6. **资源管理**：运行结束（无论成功失败）都关闭浏览器会话

use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::{ChromiumDriver, JsExecutor, PageDriver};
use crate::models::{load_question_bank, GroupRef, LedgerEntry, PollQuestion};
use crate::orchestrator::pacer::Pacer;
use crate::services::{ConnectivityGuard, GroupDiscovery, Ledger, SessionStore};
use crate::utils::logging::{log_groups_discovered, log_startup, print_final_stats};
use crate::workflow::{GroupOutcome, PollCtx, PollFlow};

/// 应用主结构
pub struct App {
    config: Config,
    session: BrowserSession,
    driver: ChromiumDriver,
    guard: ConnectivityGuard,
    session_store: SessionStore,
    discovery: GroupDiscovery,
    flow: PollFlow,
}

/// 运行统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub groups: usize,
    pub aborted: usize,
    pub posted: usize,
    pub ledger_rows: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let session = BrowserSession::open(&config)
            .await
            .context("打开浏览器会话失败")?;

        // page 内部使用 Arc，clone 后与会话共享同一个标签页
        let driver = ChromiumDriver::new(JsExecutor::new(session.page().clone()));

        let guard = ConnectivityGuard::new(&config).context("初始化网络检测失败")?;

        Ok(Self {
            guard,
            session_store: SessionStore::new(&config.cookies_file),
            discovery: GroupDiscovery::new(&config),
            flow: PollFlow::new(&config),
            config,
            session,
            driver,
        })
    }

    /// 运行应用主逻辑，结束后关闭浏览器
    pub async fn run(mut self) -> Result<RunStats> {
        let result = self.run_inner().await;
        self.session.close().await;
        result
    }

    async fn run_inner(&self) -> Result<RunStats> {
        // 题库缺失无法继续，尽早失败
        let questions = load_question_bank(&self.config.question_bank_file).await?;
        let mut ledger = Ledger::open(&self.config.ledger_file)?;

        self.ensure_logged_in().await?;
        sleep(Duration::from_secs(self.config.after_login_settle_secs)).await;

        let groups = self
            .discovery
            .discover_all(&self.driver, &self.guard)
            .await
            .context("群组采集失败")?;
        log_groups_discovered(groups.len(), self.config.max_groups);

        let mut rng = StdRng::from_entropy();
        let mut pacer = Pacer::new(&self.config);

        let stats = post_to_groups(
            &self.driver,
            &self.guard,
            &self.flow,
            &mut ledger,
            &questions,
            groups,
            self.config.max_groups,
            &mut pacer,
            &mut rng,
        )
        .await?;

        print_final_stats(&stats, &self.config.output_log_file);
        Ok(stats)
    }

    /// 恢复登录态；未登录时等待人工登录
    async fn ensure_logged_in(&self) -> Result<()> {
        self.guard.wait_until_online().await;
        self.driver.goto(&self.config.home_url).await?;

        match self.session_store.restore(&self.driver).await {
            Ok(true) => {}
            Ok(false) => info!("没有保存的登录态"),
            Err(e @ AppError::SessionFileCorrupt { .. }) => {
                error!("❌ {}", e);
                warn!(
                    "本次需要手动登录；删除 {} 之前，新的登录态不会被保存",
                    self.session_store.path().display()
                );
            }
            Err(e) => warn!("恢复 Cookie 失败，将重新登录: {}", e),
        }
        self.driver.reload().await?;

        let current_url = self.driver.current_url().await?;
        if current_url.contains(&self.config.feed_marker) {
            info!("✓ 已登录");
            return Ok(());
        }

        self.guard.wait_until_online().await;
        self.login().await
    }

    async fn login(&self) -> Result<()> {
        self.driver.goto(&self.config.login_url).await?;
        info!("🔑 请在浏览器中手动完成登录（含验证码），完成后按回车继续...");

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .context("读取终端输入失败")?;

        let current_url = self.driver.current_url().await?;
        if !current_url.contains(&self.config.feed_marker) {
            error!("登录后未进入首页，当前地址: {}", current_url);
        }

        self.session_store
            .persist_if_absent(&self.driver)
            .await
            .context("保存 Cookie 失败")?;
        Ok(())
    }
}

/// 逐组发布：只处理前 `max_groups` 个群组
///
/// 每个群组结束后（无论成功或中止）都把已发布的投票写入账本，再节流
#[allow(clippy::too_many_arguments)]
pub async fn post_to_groups<D, R>(
    driver: &D,
    guard: &ConnectivityGuard,
    flow: &PollFlow,
    ledger: &mut Ledger,
    questions: &[PollQuestion],
    groups: Vec<GroupRef>,
    max_groups: usize,
    pacer: &mut Pacer,
    rng: &mut R,
) -> Result<RunStats>
where
    D: PageDriver + ?Sized,
    R: Rng + ?Sized,
{
    let ledger_file = ledger.path().display().to_string();
    let selected: Vec<GroupRef> = groups.into_iter().take(max_groups).collect();
    let total = selected.len();
    let mut stats = RunStats {
        groups: total,
        ..Default::default()
    };

    for (idx, group) in selected.into_iter().enumerate() {
        let ctx = PollCtx::new(group, idx + 1, total);
        info!("\n{} {}", ctx, "─".repeat(30));
        info!("{} 开始处理: {}", ctx, ctx.group_url());

        let outcome = flow.run(driver, guard, ledger, questions, &ctx, rng).await;

        for question in outcome.posted() {
            let entry = LedgerEntry::new(ctx.group_id(), ctx.group_url(), question.id);
            if ledger
                .append(entry)
                .with_context(|| format!("写入账本失败: {}", ledger_file))?
            {
                stats.ledger_rows += 1;
            }
        }
        stats.posted += outcome.posted().len();

        match &outcome {
            GroupOutcome::Posted(posted) => {
                info!("{} ✅ 处理完成，发布 {} 个投票", ctx, posted.len());
            }
            GroupOutcome::Aborted { reason, posted } => {
                stats.aborted += 1;
                warn!("{} ⚠️ 已中止 (中止前已发布 {} 个): {}", ctx, posted.len(), reason);
            }
        }

        pacer.throttle().await;
        pacer.jitter(rng).await;
    }

    Ok(stats)
}
