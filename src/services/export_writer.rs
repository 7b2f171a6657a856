//! 结果回填与导出 - 业务能力层
//!
//! 把答案按原始行号写回表格的 "Answers" 列，并序列化为单工作表 xlsx

use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::error::ExportError;
use crate::models::question::Question;
use crate::models::table::Table;

/// 答案列表头
pub const ANSWERS_HEADER: &str = "Answers";

/// 原始表格 + Answers 列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 回填答案
///
/// 答案数量必须与问题数量一致，否则不生成下载文件。
/// 已有名为 "Answers" 的列时原地覆盖，否则追加到最右侧。
pub fn reassemble(
    table: &Table,
    questions: &[Question],
    answers: &[String],
) -> Result<ExportTable, ExportError> {
    if questions.len() != answers.len() {
        return Err(ExportError::CountMismatch {
            questions: questions.len(),
            answers: answers.len(),
        });
    }

    let width = table.width();
    let answers_col = table
        .headers
        .iter()
        .position(|h| h == ANSWERS_HEADER)
        .unwrap_or(width);
    let out_width = width.max(answers_col + 1);

    let mut headers = table.headers.clone();
    headers.resize(out_width, String::new());
    headers[answers_col] = ANSWERS_HEADER.to_string();

    let mut rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.resize(out_width, String::new());
            row[answers_col].clear();
            row
        })
        .collect();

    for (question, answer) in questions.iter().zip(answers) {
        if let Some(row) = question.source_row.and_then(|r| rows.get_mut(r)) {
            row[answers_col] = answer.clone();
        }
    }

    debug!("答案已回填到第 {} 列", answers_col + 1);

    Ok(ExportTable { headers, rows })
}

impl ExportTable {
    /// 答案列的索引
    pub fn answers_column(&self) -> Option<usize> {
        self.headers.iter().position(|h| h == ANSWERS_HEADER)
    }

    /// 序列化为 xlsx 字节流
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in self.headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, header)?;
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row_idx as u32 + 1, col as u16, value)?;
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}
