//! 单次提交处理器 - 编排层
//!
//! 一次提交 = 一个 `SubmissionRequest`，同步顺序地处理到结束。
//! 已展示的答案不会因为后续失败而撤回。

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppResult, InputError, LlmError};
use crate::models::loaders::load_table;
use crate::models::question::{Answer, AnswerSource, Question};
use crate::models::request::SubmissionRequest;
use crate::models::table::Table;
use crate::services::{
    extract_questions, reassemble, AccessGate, AnswerCollaborator, ColumnReference, Corrections,
    ExportTable,
};
use crate::utils::logging::print_submission_stats;
use crate::workflow::{resolve, AnswerFlow, InputMode, QuestionCtx};

/// 答案展示接口，每产生一个答案立即调用
pub trait AnswerSink {
    fn show(&mut self, ctx: &QuestionCtx, question: &Question, answer: &Answer);

    fn show_failure(&mut self, _ctx: &QuestionCtx, _question: &Question, _error: &LlmError) {}
}

/// 在"继续"策略下被跳过的问题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFailure {
    pub index: usize,
    pub question: String,
    pub error: String,
}

/// 一次提交的处理结果
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// 是否为批量（文件）模式
    pub batch: bool,
    pub questions: Vec<Question>,
    /// 成功得到的答案，顺序与问题一致（跳过失败项）
    pub answers: Vec<Answer>,
    pub failures: Vec<QuestionFailure>,
    /// 仅在批量模式且答案数量与问题数量一致时存在
    pub export: Option<ExportTable>,
}

/// 单次提交处理器
pub struct SubmissionProcessor<'a> {
    config: &'a Config,
    collaborator: &'a dyn AnswerCollaborator,
    gate: AccessGate,
}

impl<'a> SubmissionProcessor<'a> {
    pub fn new(config: &'a Config, collaborator: &'a dyn AnswerCollaborator) -> Self {
        Self {
            config,
            collaborator,
            gate: AccessGate::from_config(config),
        }
    }

    /// 处理一次提交
    ///
    /// 校验或文件错误在任何外部调用之前返回；
    /// LLM 失败按 `continue_on_error` 决定中止还是跳过
    pub async fn process(
        &self,
        request: &SubmissionRequest,
        corrections: &Corrections,
        sink: &mut dyn AnswerSink,
    ) -> AppResult<SubmissionOutcome> {
        self.gate.verify(request.password.as_deref())?;

        let mode = resolve(request).require_valid()?;
        let (questions, table) = self.collect_questions(mode)?;

        let total = questions.len();
        info!("Processing {} question(s)...", total);

        let flow = AnswerFlow::new(self.collaborator, corrections, self.config);
        let mut answers = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (idx, question) in questions.iter().enumerate() {
            let ctx = QuestionCtx::new(
                idx + 1,
                total,
                request.customer_name.as_str(),
                request.product,
            );

            match flow.run(&ctx, question).await {
                Ok(answer) => {
                    sink.show(&ctx, question, &answer);
                    answers.push(answer);
                }
                Err(e) if self.config.continue_on_error => {
                    warn!("{} ⚠️ 回答失败，继续处理剩余问题: {}", ctx, e);
                    sink.show_failure(&ctx, question, &e);
                    failures.push(QuestionFailure {
                        index: ctx.index,
                        question: question.text.clone(),
                        error: e.to_string(),
                    });
                }
                Err(e) => {
                    error!("{} ❌ 回答失败，中止本次提交: {}", ctx, e);
                    return Err(e.into());
                }
            }
        }

        let export = table.and_then(|table| self.build_export(&table, &questions, &answers));

        let corrected = answers
            .iter()
            .filter(|a| a.source == AnswerSource::Corrected)
            .count();
        print_submission_stats(answers.len(), corrected, failures.len(), total);

        Ok(SubmissionOutcome {
            batch: mode.is_batch(),
            questions,
            answers,
            failures,
            export,
        })
    }

    /// 根据输入模式得到问题列表（批量模式同时返回原始表格）
    fn collect_questions(&self, mode: InputMode<'_>) -> AppResult<(Vec<Question>, Option<Table>)> {
        match mode {
            InputMode::Single { question } => Ok((vec![Question::single(question)], None)),
            InputMode::Batch {
                customer,
                upload,
                column,
            } => {
                info!("📁 客户: {} | 文件: {} | 列: {}", customer, upload.name, column);
                let table = load_table(upload)?;
                let column = ColumnReference::parse(column)?;
                let questions = extract_questions(&table, column)?;
                Ok((questions, Some(table)))
            }
            InputMode::Invalid => Err(InputError::MissingFields.into()),
        }
    }

    fn build_export(
        &self,
        table: &Table,
        questions: &[Question],
        answers: &[Answer],
    ) -> Option<ExportTable> {
        let texts: Vec<String> = answers.iter().map(|a| a.text.clone()).collect();
        match reassemble(table, questions, &texts) {
            Ok(export) => Some(export),
            Err(e) => {
                warn!("⚠️ {}", e);
                None
            }
        }
    }
}
