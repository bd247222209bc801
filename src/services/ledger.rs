//! 发布记录账本 - 业务能力层
//!
//! 记录 (群组, 题目) 组合，防止跨运行重复发布。只追加，不修改。

use std::fs::OpenOptions;
use std::io::Write;
use std::mem::take;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{LedgerEntry, LEDGER_HEADERS};

pub struct Ledger {
    path: PathBuf,
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// 打开账本并加载已有记录
    ///
    /// 文件不存在或为空视为没有历史记录
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let entries = read_entries(&path)?;

        if entries.is_empty() {
            info!("账本为空: {}", path.display());
        } else {
            info!("✓ 已加载 {} 条发布记录", entries.len());
        }

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// 该群组是否已发布过该题
    pub fn exists(&self, group_id: u64, question_id: u32) -> bool {
        self.entries
            .iter()
            .any(|e| e.group_id == group_id && e.question_id == question_id)
    }

    /// 该群组地址是否已有记录
    pub fn group_url_exists(&self, group_url: &str) -> bool {
        self.entries.iter().any(|e| e.group_url == group_url)
    }

    /// 追加一行；文件中已有完全相同的行时跳过并返回 false
    pub fn append(&mut self, entry: LedgerEntry) -> AppResult<bool> {
        let on_disk = read_rows(&self.path)?;
        let fields = entry.to_fields();

        if on_disk.iter().any(|row| row.as_slice() == fields.as_slice()) {
            info!("记录已存在，跳过写入: {:?}", fields);
            if !self.entries.contains(&entry) {
                self.entries.push(entry);
            }
            return Ok(false);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::file(&self.path, e))?;

        let mut out = String::new();
        if on_disk.is_empty() {
            out.push_str(&encode_row(&LEDGER_HEADERS));
        }
        out.push_str(&encode_row(&fields));
        file.write_all(out.as_bytes())
            .map_err(|e| AppError::file(&self.path, e))?;

        debug!("已写入账本: {:?}", fields);
        self.entries.push(entry);
        Ok(true)
    }
}

fn read_rows(path: &Path) -> AppResult<Vec<Vec<String>>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(parse_rows(&text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(AppError::file(path, e)),
    }
}

fn read_entries(path: &Path) -> AppResult<Vec<LedgerEntry>> {
    let rows = read_rows(path)?;
    let mut entries = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if i == 0 && row.first().map(String::as_str) == Some(LEDGER_HEADERS[0]) {
            continue;
        }
        match LedgerEntry::from_fields(row) {
            Some(entry) => entries.push(entry),
            None => warn!("账本第 {} 行格式不正确，已忽略: {:?}", i + 1, row),
        }
    }

    Ok(entries)
}

/* ---------------- CSV ---------------- */

/// 解析逗号分隔文本（支持引号与 CRLF）
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

fn encode_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = fields
        .iter()
        .map(|f| encode_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}
