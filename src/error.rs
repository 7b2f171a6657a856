use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 表格读取 / 列定位错误
    #[error("文件处理错误: {0}")]
    Table(#[from] TableError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 更正存储错误
    #[error("更正存储错误: {0}")]
    Store(#[from] StoreError),
    /// 访问控制错误
    #[error("访问错误: {0}")]
    Access(#[from] AccessError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 输入校验错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 既没有单个问题，也没有完整的批量字段
    #[error("Please provide either a unique question OR all multi-question fields (Customer Name, File, Column).")]
    MissingFields,
    /// 未知的产品 / 模型标签
    #[error("未知的产品: {label}")]
    UnknownProduct { label: String },
}

/// 表格相关错误
#[derive(Debug, Error)]
pub enum TableError {
    /// 列引用不是单个 A-Z 字母
    #[error("无效的列引用: '{reference}' (仅支持单个字母 A-Z)")]
    InvalidColumnReference { reference: String },
    /// 列索引超出表格宽度
    #[error("列 {column} (索引 {index}) 超出范围，表格共 {width} 列")]
    ColumnOutOfRange {
        column: char,
        index: usize,
        width: usize,
    },
    /// 该列没有任何非空问题
    #[error("列 {column} 中没有找到任何问题")]
    EmptyBatch { column: char },
    /// 文件解析失败
    #[error("无法解析文件 {name}: {message}")]
    Parse { name: String, message: String },
    /// 工作簿中没有工作表
    #[error("工作簿 {name} 中没有工作表")]
    NoWorksheet { name: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败 (模型: {model}): {source}")]
    RequestBuild {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 更正存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 未配置存储地址
    #[error("未配置更正存储 (CORRECTION_STORE_URL)")]
    NotConfigured,
    /// 网络请求失败
    #[error("请求更正存储失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 存储返回非成功状态码
    #[error("更正存储返回错误状态 ({url}): {status}")]
    BadStatus { url: String, status: u16 },
    /// 文档不是 JSON 对象
    #[error("更正存储文档格式错误: {message}")]
    MalformedDocument { message: String },
}

/// 访问控制错误
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("需要密码才能访问")]
    PasswordRequired,
    #[error("Incorrect password. Please try again.")]
    IncorrectPassword,
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 答案数量与问题数量不一致
    #[error("答案数量 {answers} 与问题数量 {questions} 不一致，不生成下载文件")]
    CountMismatch { questions: usize, answers: usize },
    /// 写入 xlsx 失败
    #[error("写入 xlsx 失败: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl LlmError {
    /// 创建LLM API调用错误
    pub fn api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        }
    }
}

impl AppError {
    /// 是否属于"文件处理"类错误（列引用 / 解析）
    pub fn is_file_processing(&self) -> bool {
        matches!(self, AppError::Table(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_matches_form_warning() {
        let err = AppError::from(InputError::MissingFields);
        assert!(err.to_string().contains("Customer Name, File, Column"));
    }

    #[test]
    fn test_out_of_range_is_file_processing() {
        let err = AppError::from(TableError::ColumnOutOfRange {
            column: 'Z',
            index: 25,
            width: 3,
        });
        assert!(err.is_file_processing());
        assert!(err.to_string().contains("索引 25"));
    }
}
