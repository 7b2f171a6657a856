//! 上传文件 -> Table
//!
//! - `.csv` 使用 `csv` crate 读取
//! - 其它后缀一律按工作簿处理（xlsx / xls / xlsb / ods），只读取第一个工作表

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use crate::error::TableError;
use crate::models::request::UploadedFile;
use crate::models::table::Table;

/// 解析上传文件
pub fn load_table(file: &UploadedFile) -> Result<Table, TableError> {
    let table = if file.is_csv() {
        load_csv(file)?
    } else {
        load_workbook(file)?
    };

    debug!(
        "文件 {} 解析完成: {} 列, {} 行数据",
        file.name,
        table.width(),
        table.row_count()
    );

    Ok(table)
}

fn load_csv(file: &UploadedFile) -> Result<Table, TableError> {
    let content = decode_text(&file.bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| parse_error(file, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(file, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows))
}

fn load_workbook(file: &UploadedFile) -> Result<Table, TableError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(file.bytes.clone()))
        .map_err(|e| parse_error(file, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::NoWorksheet {
            name: file.name.clone(),
        })?
        .map_err(|e| parse_error(file, e))?;

    // calamine 的区域从第一个非空单元格开始，左侧空列需要补回来，保证列字母按位置对应
    let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut grid = range.rows().map(|row| {
        std::iter::repeat(String::new())
            .take(leading_cols)
            .chain(row.iter().map(cell_to_string))
            .collect::<Vec<String>>()
    });

    let headers = grid.next().unwrap_or_default();
    let rows = grid.collect();

    Ok(Table::new(headers, rows))
}

/// 单元格转字符串，整数值的浮点数去掉 `.0`
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// 优先按 UTF-8 解码，失败时按 Windows-1252 解码（Excel 导出的 CSV 常见）
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

fn parse_error(file: &UploadedFile, err: impl std::fmt::Display) -> TableError {
    TableError::Parse {
        name: file.name.clone(),
        message: err.to_string(),
    }
}
