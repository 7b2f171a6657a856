//! LLM 服务 - 业务能力层
//!
//! 只负责"把一个提示词换成一段回答"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型（兼容 OpenAI API 的服务均可）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// 一次聊天补全请求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// 回答协作者：外部聊天补全服务的抽象
///
/// 流程层只依赖这个 trait，测试时用内存实现替换
#[async_trait]
pub trait AnswerCollaborator: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// 基于 async-openai 的 LLM 服务
pub struct LlmService {
    client: Client<OpenAIConfig>,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
        }
    }
}

#[async_trait]
impl AnswerCollaborator for LlmService {
    /// 发送单条 user 消息，返回去掉首尾空白的回答
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", request.model);
        debug!("提示词长度: {} 字符", request.prompt.len());

        let build_err = |e: async_openai::error::OpenAIError| LlmError::RequestBuild {
            model: request.model.clone(),
            source: Box::new(e),
        };

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(request.prompt.as_str())
            .build()
            .map_err(build_err)?;

        #[allow(deprecated)]
        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .build()
            .map_err(build_err)?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            LlmError::api_failed(&request.model, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: request.model.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试真实 LLM 调用
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=... cargo test test_complete_against_live_endpoint -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_complete_against_live_endpoint() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let service = LlmService::new(&config);

        let request = CompletionRequest {
            model: "gpt-4-turbo".to_string(),
            prompt: "Reply with the single word: ready".to_string(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
        };

        match service.complete(&request).await {
            Ok(response) => {
                println!("\n========== LLM 响应 ==========");
                println!("{}", response);
                println!("==============================\n");
                assert!(!response.is_empty());
            }
            Err(e) => panic!("LLM 调用失败: {}", e),
        }
    }
}
