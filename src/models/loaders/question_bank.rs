use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::poll_question::{PollQuestion, QuestionBlock};

/// 解析题库文本
///
/// 以数字开头的行开启新题目块，其后的非空行是该题的选项，空行仅作分隔。
/// 第一道题之前的行会被丢弃。
pub fn parse_question_bank(text: &str) -> Vec<QuestionBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<QuestionBlock> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(|c: char| c.is_ascii_digit()) {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(QuestionBlock::new(line));
        } else if let Some(block) = current.as_mut() {
            block.option_lines.push(line.to_string());
        } else {
            warn!("题库中第一道题之前的内容已忽略: {}", line);
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}

/// 把题目块转换为投票题目；题号无法解析（如超出范围）的块会被丢弃并告警
pub fn questions_from_blocks(blocks: &[QuestionBlock]) -> Vec<PollQuestion> {
    let mut questions = Vec::with_capacity(blocks.len());
    for block in blocks {
        match PollQuestion::from_block(block) {
            Some(question) => questions.push(question),
            None => warn!("题号无法解析，已忽略该题: {}", block.question_line),
        }
    }
    questions
}

/// 加载题库文件并转换为投票题目列表
pub async fn load_question_bank(path: impl AsRef<Path>) -> AppResult<Vec<PollQuestion>> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::QuestionBankMissing {
                path: path.to_path_buf(),
            }
        } else {
            AppError::file(path, e)
        }
    })?;

    let questions = questions_from_blocks(&parse_question_bank(&content));

    info!("✓ 题库加载完成: {} 道题 ({})", questions.len(), path.display());
    Ok(questions)
}
