/// 待回答的问题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// 问题文本（已去除首尾空白）
    pub text: String,
    /// 在原始表格中的数据行号（从 0 开始，不含表头）；单问题模式下为 None
    pub source_row: Option<usize>,
}

impl Question {
    /// 用户直接输入的单个问题
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_row: None,
        }
    }

    /// 来自表格某一行的问题
    pub fn from_row(text: impl Into<String>, source_row: usize) -> Self {
        Self {
            text: text.into(),
            source_row: Some(source_row),
        }
    }
}

/// 答案来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// 由聊天接口生成
    Generated,
    /// 来自更正库
    Corrected,
}

/// 单个问题的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}
