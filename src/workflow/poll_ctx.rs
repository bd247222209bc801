//! 群组处理上下文
//!
//! 封装"我正在处理第几个群组、哪个群组"这一信息

use std::fmt::Display;

use crate::models::GroupRef;

/// 群组处理上下文
#[derive(Debug, Clone)]
pub struct PollCtx {
    pub group: GroupRef,

    /// 群组序号（从1开始，仅用于日志显示）
    pub group_index: usize,

    /// 本次处理的群组总数
    pub total_groups: usize,
}

impl PollCtx {
    pub fn new(group: GroupRef, group_index: usize, total_groups: usize) -> Self {
        Self {
            group,
            group_index,
            total_groups,
        }
    }

    pub fn group_url(&self) -> &str {
        &self.group.url
    }

    pub fn group_id(&self) -> u64 {
        self.group.id
    }
}

impl Display for PollCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[群组 {}/{} #{}]",
            self.group_index, self.total_groups, self.group.id
        )
    }
}
