//! 单个问题的回答流程 - 流程层
//!
//! 流程顺序：
//! 1. 更正库命中 → 直接返回更正后的答案
//! 2. 构建提示词 → 调用回答协作者
//! 3. 清洗回答

use tracing::{debug, info};

use crate::config::Config;
use crate::error::LlmError;
use crate::models::question::{Answer, AnswerSource, Question};
use crate::services::{
    build_answer_prompt, AnswerCollaborator, CompletionRequest, Corrections, Sanitizer,
};
use crate::utils::logging::truncate_text;
use crate::workflow::question_ctx::QuestionCtx;

/// 单个问题的回答流程
///
/// - 不持有任何资源，只借用协作者和更正快照
/// - 不关心批量顺序和失败策略
pub struct AnswerFlow<'a> {
    collaborator: &'a dyn AnswerCollaborator,
    corrections: &'a Corrections,
    sanitizer: Sanitizer,
    max_tokens: u32,
    temperature: f32,
}

impl<'a> AnswerFlow<'a> {
    pub fn new(
        collaborator: &'a dyn AnswerCollaborator,
        corrections: &'a Corrections,
        config: &Config,
    ) -> Self {
        Self {
            collaborator,
            corrections,
            sanitizer: Sanitizer::new(config.strip_conclusions),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
        }
    }

    pub async fn run(&self, ctx: &QuestionCtx, question: &Question) -> Result<Answer, LlmError> {
        info!("{} {}", ctx, truncate_text(&question.text, 80));

        if let Some(corrected) = self.corrections.get(&question.text) {
            info!("{} ✓ 命中更正库，跳过 LLM 调用", ctx);
            return Ok(Answer {
                text: corrected.to_string(),
                source: AnswerSource::Corrected,
            });
        }

        let request = CompletionRequest {
            model: ctx.product.model_id.to_string(),
            prompt: build_answer_prompt(&ctx.customer_name, &ctx.product, &question.text),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let raw = self.collaborator.complete(&request).await?;
        let text = self.sanitizer.clean(&raw);

        debug!("{} 回答长度: {} -> {} 字符", ctx, raw.len(), text.len());

        Ok(Answer {
            text,
            source: AnswerSource::Generated,
        })
    }
}
