//! 投票发布流程 - 流程层
//!
//! 核心职责：定义"一个群组"的完整处理流程
//!
//! 流程顺序：
//! 1. 群组已有记录 → 整组跳过
//! 2. 随机抽题 → 校验长度 → 查账本
//! 3. 页面填写并发布
//!
//! 页面操作一旦失败，整个群组立即中止（不是只跳过当前题）。

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::PollQuestion;
use crate::services::{ConnectivityGuard, Ledger, PollComposer};
use crate::utils::truncate_text;
use crate::workflow::poll_ctx::PollCtx;

/// 单个群组的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// 实际发布的题目（可能为空）
    Posted(Vec<PollQuestion>),
    /// 页面操作失败，整组中止；`posted` 为中止前已发布的题目
    Aborted {
        reason: String,
        posted: Vec<PollQuestion>,
    },
}

impl GroupOutcome {
    pub fn posted(&self) -> &[PollQuestion] {
        match self {
            GroupOutcome::Posted(questions) => questions,
            GroupOutcome::Aborted { posted, .. } => posted,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, GroupOutcome::Aborted { .. })
    }
}

/// 投票发布流程
///
/// - 决定抽哪些题、哪些题跳过
/// - 不持有任何资源（page）
/// - 不写账本，只返回结果（中止时也带回已发布的题目）
pub struct PollFlow {
    composer: PollComposer,
    questions_per_group: usize,
    group_page_settle: Duration,
    post_settle: Duration,
    verbose_logging: bool,
}

impl PollFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            composer: PollComposer::new(config),
            questions_per_group: config.questions_per_group,
            group_page_settle: Duration::from_secs(config.group_page_settle_secs),
            post_settle: Duration::from_secs(config.post_settle_secs),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run<D, R>(
        &self,
        driver: &D,
        guard: &ConnectivityGuard,
        ledger: &Ledger,
        questions: &[PollQuestion],
        ctx: &PollCtx,
        rng: &mut R,
    ) -> GroupOutcome
    where
        D: PageDriver + ?Sized,
        R: Rng + ?Sized,
    {
        if ledger.group_url_exists(ctx.group_url()) {
            info!("{} 该群组已发布过投票，跳过: {}", ctx, ctx.group_url());
            return GroupOutcome::Posted(Vec::new());
        }

        if let Err(e) = driver.goto(ctx.group_url()).await {
            error!("{} 打开群组页面失败: {} ({})", ctx, e, ctx.group_url());
            return GroupOutcome::Aborted {
                reason: e.to_string(),
                posted: Vec::new(),
            };
        }
        guard.wait_until_online().await;
        sleep(self.group_page_settle).await;

        let picked: Vec<&PollQuestion> = questions
            .choose_multiple(rng, self.questions_per_group)
            .collect();
        info!("{} 抽取了 {} 道题", ctx, picked.len());

        let mut created = Vec::new();

        for question in picked {
            if self.verbose_logging {
                info!("{} 题目 {}: {}", ctx, question.id, truncate_text(&question.text, 80));
            }

            if let Err(e) = question.validate() {
                warn!("{} 题目 '{}' 校验未通过，跳过: {}", ctx, question.question_line, e);
                continue;
            }

            if ledger.exists(ctx.group_id(), question.id) {
                info!(
                    "{} 已处理过该群组与题目，跳过: {}",
                    ctx,
                    truncate_text(&question.text, 40)
                );
                continue;
            }

            guard.wait_until_online().await;
            if let Err(e) = self.composer.compose(driver, question).await {
                error!("{} ❌ 创建投票失败，中止该群组: {} ({})", ctx, e, ctx.group_url());
                return GroupOutcome::Aborted {
                    reason: e.to_string(),
                    posted: created,
                };
            }

            info!("{} ✓ 投票已发布: 题目 {}", ctx, question.id);
            sleep(self.post_settle).await;
            guard.wait_until_online().await;
            created.push(question.clone());
        }

        GroupOutcome::Posted(created)
    }
}
