//! 列定位服务 - 业务能力层
//!
//! 把单个字母的列引用换算成位置索引，并取出该列的全部非空问题

use tracing::debug;

use crate::error::TableError;
use crate::models::question::Question;
use crate::models::table::Table;

/// 单字母列引用（A-Z），按位置而不是表头名称定位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnReference {
    letter: char,
}

impl ColumnReference {
    /// 解析用户输入：去空白、转大写，只接受单个 A-Z 字母
    pub fn parse(reference: &str) -> Result<Self, TableError> {
        let normalized = reference.trim().to_ascii_uppercase();
        let mut chars = normalized.chars();

        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_uppercase() => Ok(Self { letter }),
            _ => Err(TableError::InvalidColumnReference {
                reference: reference.to_string(),
            }),
        }
    }

    pub fn letter(self) -> char {
        self.letter
    }

    /// 从 0 开始的列索引，`A` -> 0
    pub fn index(self) -> usize {
        (self.letter as u8 - b'A') as usize
    }
}

/// 提取指定列的问题列表
///
/// 空单元格（或只有空白）被丢弃，顺序与原始行顺序一致
pub fn extract_questions(
    table: &Table,
    column: ColumnReference,
) -> Result<Vec<Question>, TableError> {
    let index = column.index();
    let width = table.width();

    if index >= width {
        return Err(TableError::ColumnOutOfRange {
            column: column.letter(),
            index,
            width,
        });
    }

    let questions: Vec<Question> = (0..table.row_count())
        .filter_map(|row| {
            let text = table.cell(row, index).trim();
            (!text.is_empty()).then(|| Question::from_row(text, row))
        })
        .collect();

    if questions.is_empty() {
        return Err(TableError::EmptyBatch {
            column: column.letter(),
        });
    }

    debug!(
        "列 {} 共提取 {} 个问题 (数据行 {})",
        column.letter(),
        questions.len(),
        table.row_count()
    );

    Ok(questions)
}
