//! 上传文件解析后的表格数据

/// 表格：第一行作为表头，其余为数据行，所有单元格以字符串保存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// 表格宽度：表头与最长数据行中的较大者
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// 数据行数（不含表头）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 取某个单元格，越界或缺失时视为空
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}
