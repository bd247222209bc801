/// 账本表头
pub const LEDGER_HEADERS: [&str; 3] = ["Group_ID", "Group_URL", "Question_ID"];

/// 账本中的一行：某群组已发布过某道题
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgerEntry {
    pub group_id: u64,
    pub group_url: String,
    pub question_id: u32,
}

impl LedgerEntry {
    pub fn new(group_id: u64, group_url: impl Into<String>, question_id: u32) -> Self {
        Self {
            group_id,
            group_url: group_url.into(),
            question_id,
        }
    }

    pub fn to_fields(&self) -> [String; 3] {
        [
            self.group_id.to_string(),
            self.group_url.clone(),
            self.question_id.to_string(),
        ]
    }

    /// 从 CSV 字段解析；表头或格式不对时返回 None
    pub fn from_fields(fields: &[String]) -> Option<Self> {
        match fields {
            [group_id, group_url, question_id] => Some(Self {
                group_id: group_id.trim().parse().ok()?,
                group_url: group_url.trim().to_string(),
                question_id: question_id.trim().parse().ok()?,
            }),
            _ => None,
        }
    }
}
