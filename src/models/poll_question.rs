use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 题干长度上限
pub const MAX_QUESTION_CHARS: usize = 140;
/// 单个选项长度上限
pub const MAX_OPTION_CHARS: usize = 30;
/// 投票最多使用的选项数
pub const MAX_OPTIONS: usize = 4;
/// 投票至少需要的选项数
pub const MIN_OPTIONS: usize = 2;

/// 题库文件中的原始题目块：题干行 + 选项行
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionBlock {
    pub question_line: String,
    pub option_lines: Vec<String>,
}

impl QuestionBlock {
    pub fn new(question_line: impl Into<String>) -> Self {
        Self {
            question_line: question_line.into(),
            option_lines: Vec::new(),
        }
    }

    /// 按文件顺序返回所有行，第一行为题干
    pub fn lines(&self) -> Vec<&str> {
        std::iter::once(self.question_line.as_str())
            .chain(self.option_lines.iter().map(String::as_str))
            .collect()
    }
}

/// 投票题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollQuestion {
    /// 题号（题干行开头的数字）
    pub id: u32,
    /// 题干行原文
    pub question_line: String,
    /// 去掉 "N." 标记后的题干
    pub text: String,
    /// 选项行原文
    pub options: Vec<String>,
}

fn question_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)\s*[.)]?\s*(.*)$").expect("valid regex"))
}

fn option_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:[A-Za-z][.)]|\d{1,2}[.)]|[-*•])\s+").expect("valid regex"))
}

impl PollQuestion {
    /// 从题目块解析；题干行不以数字开头时返回 None
    pub fn from_block(block: &QuestionBlock) -> Option<Self> {
        let caps = question_marker().captures(&block.question_line)?;
        let id = caps.get(1)?.as_str().parse().ok()?;
        let text = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

        Some(Self {
            id,
            question_line: block.question_line.clone(),
            text: text.to_string(),
            options: block.option_lines.clone(),
        })
    }

    /// 校验长度与选项数量，通过后才允许进入页面操作
    pub fn validate(&self) -> Result<(), ValidationError> {
        let len = self.text.chars().count();
        if len > MAX_QUESTION_CHARS {
            return Err(ValidationError::QuestionTooLong {
                len,
                max: MAX_QUESTION_CHARS,
            });
        }

        if let Some(option) = self
            .options
            .iter()
            .find(|o| o.chars().count() > MAX_OPTION_CHARS)
        {
            return Err(ValidationError::OptionTooLong {
                option: option.clone(),
                len: option.chars().count(),
                max: MAX_OPTION_CHARS,
            });
        }

        if self.options.len() < MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions {
                count: self.options.len(),
                min: MIN_OPTIONS,
            });
        }

        Ok(())
    }

    /// 实际填写到页面的选项（最多 4 个，去掉前缀标记）
    pub fn display_options(&self) -> Vec<String> {
        self.options
            .iter()
            .take(MAX_OPTIONS)
            .map(|o| strip_option_marker(o))
            .collect()
    }
}

/// 去掉选项前的 "a)" / "A." / "1)" / "-" 之类的标记
pub fn strip_option_marker(option: &str) -> String {
    option_marker().replace(option, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> QuestionBlock {
        QuestionBlock {
            question_line: lines[0].to_string(),
            option_lines: lines[1..].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn parses_id_and_text() {
        let q = PollQuestion::from_block(&block(&["12. Do you use Rust at work?", "Yes", "No"])).unwrap();
        assert_eq!(q.id, 12);
        assert_eq!(q.text, "Do you use Rust at work?");
        assert_eq!(q.options, vec!["Yes", "No"]);
    }

    #[test]
    fn text_keeps_inner_periods() {
        let q = PollQuestion::from_block(&block(&["3. Is v2.0 ready?", "a", "b"])).unwrap();
        assert_eq!(q.text, "Is v2.0 ready?");
    }

    #[test]
    fn rejects_non_numeric_question_line() {
        assert!(PollQuestion::from_block(&block(&["What?", "a", "b"])).is_none());
    }

    #[test]
    fn question_length_boundary() {
        let ok = format!("1. {}", "q".repeat(MAX_QUESTION_CHARS));
        let q = PollQuestion::from_block(&block(&[ok.as_str(), "A", "B"])).unwrap();
        assert!(q.validate().is_ok());

        let long = format!("1. {}", "q".repeat(MAX_QUESTION_CHARS + 1));
        let q = PollQuestion::from_block(&block(&[long.as_str(), "A", "B"])).unwrap();
        assert_eq!(
            q.validate(),
            Err(ValidationError::QuestionTooLong { len: 141, max: 140 })
        );
    }

    #[test]
    fn option_length_boundary() {
        let edge = "o".repeat(MAX_OPTION_CHARS);
        let q = PollQuestion::from_block(&block(&["1. Q?", &edge, "B"])).unwrap();
        assert!(q.validate().is_ok());

        let long = "o".repeat(MAX_OPTION_CHARS + 1);
        let q = PollQuestion::from_block(&block(&["1. Q?", "A", &long])).unwrap();
        assert!(matches!(q.validate(), Err(ValidationError::OptionTooLong { len: 31, .. })));
    }

    #[test]
    fn needs_two_options() {
        let q = PollQuestion::from_block(&block(&["1. Q?", "only"])).unwrap();
        assert_eq!(
            q.validate(),
            Err(ValidationError::TooFewOptions { count: 1, min: 2 })
        );
    }

    #[test]
    fn display_options_strip_markers_and_cap_at_four() {
        let q = PollQuestion::from_block(&block(&[
            "1. Q?", "a) Rust", "B. Go", "3) Zig", "- C", "e) extra",
        ]))
        .unwrap();
        assert_eq!(q.display_options(), vec!["Rust", "Go", "Zig", "C"]);
    }

    #[test]
    fn unmarked_option_is_kept() {
        assert_eq!(strip_option_marker("Yes"), "Yes");
        assert_eq!(strip_option_marker("Open source"), "Open source");
    }
}
