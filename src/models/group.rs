use std::fmt::Display;

use url::Url;

/// 群组引用：地址 + 由地址推导的数字 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub url: String,
    pub id: u64,
}

impl GroupRef {
    /// 地址最后一个非空路径段不是数字时返回 None
    pub fn from_url(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        let id = group_id_from_url(&url)?;
        Some(Self { url, id })
    }
}

impl Display for GroupRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.url)
    }
}

/// 取地址最后一个非空路径段作为群组 ID（兼容结尾斜杠）
pub fn group_id_from_url(url: &str) -> Option<u64> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()?
        .parse()
        .ok()
}
