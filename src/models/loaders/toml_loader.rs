use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::fs;

use crate::models::product::{Product, DEFAULT_PRODUCT};
use crate::models::request::{SubmissionRequest, UploadedFile};

/// 保存在 TOML 中的一次提交
///
/// ```toml
/// customer = "Acme Corp"
/// file = "acme_rfp.xlsx"
/// column = "B"
/// product = "GPT-4.0"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequestFile {
    pub question: Option<String>,
    pub customer: Option<String>,
    /// 相对路径以 TOML 文件所在目录为基准
    pub file: Option<PathBuf>,
    pub column: Option<String>,
    pub product: Option<String>,
    pub password: Option<String>,
}

/// 从 TOML 文件加载提交内容
pub async fn load_request_file(toml_file_path: &Path) -> Result<RequestFile> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut request: RequestFile = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    if let (Some(file), Some(base)) = (request.file.as_ref(), toml_file_path.parent()) {
        if file.is_relative() {
            request.file = Some(base.join(file));
        }
    }

    tracing::debug!("已加载提交文件: {}", toml_file_path.display());

    Ok(request)
}

impl RequestFile {
    /// 合并命令行参数与文件内容，构造不可变的提交请求
    ///
    /// `overrides` 中存在的字段优先；产品缺省时使用 `DEFAULT_PRODUCT`
    pub async fn into_request(self, overrides: RequestFile) -> Result<SubmissionRequest> {
        let product_label = overrides
            .product
            .or(self.product)
            .unwrap_or_else(|| DEFAULT_PRODUCT.to_string());

        let mut builder = SubmissionRequest::builder()
            .single_question(overrides.question.or(self.question).unwrap_or_default())
            .customer_name(overrides.customer.or(self.customer).unwrap_or_default())
            .column_reference(overrides.column.or(self.column).unwrap_or_default())
            .product(Product::from_label(&product_label)?);

        if let Some(path) = overrides.file.or(self.file) {
            let upload = UploadedFile::read(&path)
                .await
                .with_context(|| format!("无法读取上传文件: {}", path.display()))?;
            builder = builder.upload(upload);
        }

        if let Some(password) = overrides.password.or(self.password) {
            builder = builder.password(password);
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_relative_upload_path_resolves_next_to_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme.toml");
        std::fs::write(
            &path,
            "customer = \"Acme\"\nfile = \"acme.csv\"\ncolumn = \"B\"\n",
        )
        .unwrap();

        let request = load_request_file(&path).await.unwrap();
        assert_eq!(request.customer.as_deref(), Some("Acme"));
        assert_eq!(request.file, Some(dir.path().join("acme.csv")));
        assert_eq!(request.question, None);
    }

    #[tokio::test]
    async fn test_missing_file_has_context() {
        let err = load_request_file(Path::new("/nonexistent/request.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("无法读取TOML文件"));
    }

    #[tokio::test]
    async fn test_flags_override_file_values() {
        let from_file = RequestFile {
            customer: Some("Acme".to_string()),
            column: Some("B".to_string()),
            product: Some("GPT-4.0".to_string()),
            ..Default::default()
        };
        let flags = RequestFile {
            column: Some("C".to_string()),
            product: Some("Due Diligence (Fine-Tuned)".to_string()),
            ..Default::default()
        };

        let request = from_file.into_request(flags).await.unwrap();
        assert_eq!(request.column_reference, "C");
        assert_eq!(request.product.label, "Due Diligence (Fine-Tuned)");
        // 命令行未给出的字段由文件补齐
        assert_eq!(request.customer_name, "Acme");
        assert!(request.upload.is_none());
        assert_eq!(request.password, None);
    }

    #[tokio::test]
    async fn test_product_defaults_when_neither_side_sets_it() {
        let flags = RequestFile {
            question: Some("What is SSE?".to_string()),
            ..Default::default()
        };
        let request = RequestFile::default().into_request(flags).await.unwrap();
        assert_eq!(request.product.label, DEFAULT_PRODUCT);
        assert_eq!(request.single_question, "What is SSE?");
    }

    #[tokio::test]
    async fn test_upload_from_file_is_read_and_unknown_product_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("acme.csv");
        std::fs::write(&csv, "Q\nWhat?\n").unwrap();

        let from_file = RequestFile {
            file: Some(csv),
            password: Some("from-file".to_string()),
            ..Default::default()
        };
        let flags = RequestFile {
            password: Some("from-flag".to_string()),
            ..Default::default()
        };
        let request = from_file.clone().into_request(flags).await.unwrap();
        let upload = request.upload.unwrap();
        assert_eq!(upload.name, "acme.csv");
        assert_eq!(upload.bytes, b"Q\nWhat?\n");
        assert_eq!(request.password.as_deref(), Some("from-flag"));

        let flags = RequestFile {
            product: Some("GPT-2".to_string()),
            ..Default::default()
        };
        assert!(from_file.into_request(flags).await.is_err());
    }
}
