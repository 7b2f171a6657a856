//! 单次提交的请求对象
//!
//! 前端（CLI）只负责构造这个不可变对象，流程层不再读取任何全局状态

use std::path::Path;

use crate::models::product::Product;

/// 用户上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// 原始文件名，用于按后缀判断格式
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 从磁盘读取
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// 仅凭文件名后缀判断是否为 CSV
    pub fn is_csv(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".csv")
    }
}

/// 一次提交的全部输入
#[derive(Debug, Clone, Default)]
pub struct SubmissionRequest {
    pub single_question: String,
    pub customer_name: String,
    pub upload: Option<UploadedFile>,
    pub column_reference: String,
    pub product: Product,
    pub password: Option<String>,
}

impl SubmissionRequest {
    pub fn builder() -> SubmissionRequestBuilder {
        SubmissionRequestBuilder::default()
    }
}

/// `SubmissionRequest` 构造器，所有文本字段在 build 时统一 trim
#[derive(Debug, Default)]
pub struct SubmissionRequestBuilder {
    inner: SubmissionRequest,
}

impl SubmissionRequestBuilder {
    pub fn single_question(mut self, question: impl Into<String>) -> Self {
        self.inner.single_question = question.into();
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.inner.customer_name = name.into();
        self
    }

    pub fn upload(mut self, file: UploadedFile) -> Self {
        self.inner.upload = Some(file);
        self
    }

    pub fn column_reference(mut self, column: impl Into<String>) -> Self {
        self.inner.column_reference = column.into();
        self
    }

    pub fn product(mut self, product: Product) -> Self {
        self.inner.product = product;
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.inner.password = Some(password.into());
        self
    }

    pub fn build(self) -> SubmissionRequest {
        let SubmissionRequest {
            single_question,
            customer_name,
            upload,
            column_reference,
            product,
            password,
        } = self.inner;

        SubmissionRequest {
            single_question: single_question.trim().to_string(),
            customer_name: customer_name.trim().to_string(),
            upload,
            column_reference: column_reference.trim().to_string(),
            product,
            password,
        }
    }
}
