//! 输入模式判定
//!
//! 每次提交都重新判定，不缓存上一次的结果

use crate::error::InputError;
use crate::models::request::{SubmissionRequest, UploadedFile};

/// 本次提交的输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode<'a> {
    /// 用户直接输入的单个问题
    Single { question: &'a str },
    /// 从上传表格的某一列批量读取问题
    Batch {
        customer: &'a str,
        upload: &'a UploadedFile,
        column: &'a str,
    },
    /// 两种模式的必填字段都不完整
    Invalid,
}

impl InputMode<'_> {
    /// Invalid 转为错误，其它原样返回
    pub fn require_valid(self) -> Result<Self, InputError> {
        match self {
            InputMode::Invalid => Err(InputError::MissingFields),
            mode => Ok(mode),
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, InputMode::Batch { .. })
    }
}

/// 判定输入模式
///
/// 单个问题非空时总是优先走单问题模式，即使批量字段也都填写了
pub fn resolve(request: &SubmissionRequest) -> InputMode<'_> {
    if !request.single_question.is_empty() {
        return InputMode::Single {
            question: &request.single_question,
        };
    }

    let batch_fields_set =
        !request.customer_name.is_empty() && !request.column_reference.is_empty();

    match &request.upload {
        Some(upload) if batch_fields_set => InputMode::Batch {
            customer: &request.customer_name,
            upload,
            column: &request.column_reference,
        },
        _ => InputMode::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> UploadedFile {
        UploadedFile::new("rfp.csv", b"Q\nWhat?\n".to_vec())
    }

    #[test]
    fn test_single_question_only() {
        let request = SubmissionRequest::builder().single_question("What is SSE?").build();
        assert_eq!(resolve(&request), InputMode::Single { question: "What is SSE?" });
    }

    #[test]
    fn test_complete_batch_fields() {
        let request = SubmissionRequest::builder()
            .customer_name("Acme")
            .upload(upload())
            .column_reference("B")
            .build();
        assert!(resolve(&request).is_batch());
    }

    #[test]
    fn test_single_takes_precedence_over_complete_batch() {
        let request = SubmissionRequest::builder()
            .single_question("What is SSE?")
            .customer_name("Acme")
            .upload(upload())
            .column_reference("B")
            .build();
        assert_eq!(resolve(&request), InputMode::Single { question: "What is SSE?" });
    }

    #[test]
    fn test_incomplete_batch_is_invalid() {
        let cases = [
            SubmissionRequest::builder().upload(upload()).column_reference("B").build(),
            SubmissionRequest::builder().customer_name("Acme").column_reference("B").build(),
            SubmissionRequest::builder().customer_name("Acme").upload(upload()).build(),
            SubmissionRequest::builder().single_question("   ").build(),
        ];
        for request in &cases {
            assert_eq!(resolve(request), InputMode::Invalid);
            assert!(matches!(
                resolve(request).require_valid(),
                Err(InputError::MissingFields)
            ));
        }
    }
}
