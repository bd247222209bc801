//! 登录态存储服务 - 业务能力层
//!
//! 只负责 Cookie 文件的读写，文件只在不存在时写入一次

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::infrastructure::{PageDriver, StoredCookie};

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 从文件恢复 Cookie 到浏览器
    ///
    /// 文件不存在或为空时返回 false
    pub async fn restore<D: PageDriver + ?Sized>(&self, driver: &D) -> AppResult<bool> {
        let Some(cookies) = self.read()? else {
            debug!("没有可用的 Cookie 文件: {}", self.path.display());
            return Ok(false);
        };

        let count = cookies.len();
        driver.set_cookies(cookies).await?;
        info!("✓ 已恢复 {} 个 Cookie", count);
        Ok(true)
    }

    /// 保存浏览器当前 Cookie，文件已存在时不覆盖
    pub async fn persist_if_absent<D: PageDriver + ?Sized>(&self, driver: &D) -> AppResult<bool> {
        if self.path.exists() {
            debug!("Cookie 文件已存在，不覆盖: {}", self.path.display());
            return Ok(false);
        }

        let cookies = driver.cookies().await?;
        let json = serde_json::to_string_pretty(&cookies)?;
        std::fs::write(&self.path, json).map_err(|e| AppError::file(&self.path, e))?;
        info!("✓ 已保存 {} 个 Cookie 到 {}", cookies.len(), self.path.display());
        Ok(true)
    }

    fn read(&self) -> AppResult<Option<Vec<StoredCookie>>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::file(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let cookies = serde_json::from_str(&content).map_err(|source| AppError::SessionFileCorrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(cookies))
    }
}
