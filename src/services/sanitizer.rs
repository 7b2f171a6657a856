//! 回答清洗 - 业务能力层
//!
//! 基于正则的尽力而为的清洗，不理解语法：
//! 1. 去掉 markdown 粗体标记，保留内部文字
//! 2. （可选）删除结尾处"总结 / 结论 / 好处"类句子
//!
//! 第 2 步可能漏删，也可能在句中误匹配后多删。

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// 结尾总结句的起始词，匹配到文本末尾，不区分大小写
static CONCLUSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)(?:^|[.!?:]\s+|\n\s*)((?:in summary|in conclusion|to summarize|to sum up|overall|ultimately|this ensures|this helps|this provides|these features|these capabilities|by leveraging|the benefits?)\b[^\n]*?)\s*$",
    )
    .unwrap()
});

/// 回答清洗器
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer {
    strip_conclusions: bool,
}

impl Sanitizer {
    pub fn new(strip_conclusions: bool) -> Self {
        Self { strip_conclusions }
    }

    /// 按顺序执行全部清洗步骤
    pub fn clean(&self, raw: &str) -> String {
        let text = strip_bold(raw);
        if self.strip_conclusions {
            strip_conclusions(&text)
        } else {
            text
        }
    }
}

/// 去掉 `**粗体**` 标记
pub fn strip_bold(text: &str) -> String {
    BOLD.replace_all(text, "$1").trim().to_string()
}

/// 反复删除结尾的总结句，直到不再变化
///
/// 匹配从最后一段中第一个标记词开始，标记词之后的所有句子一并删除
pub fn strip_conclusions(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let Some(m) = CONCLUSION.captures(&current).and_then(|c| c.get(1)) else {
            break;
        };
        let kept = current[..m.start()].trim_end().to_string();
        if kept.is_empty() || kept == current {
            break;
        }
        current = kept;
    }
    current
}
