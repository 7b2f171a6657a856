use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    /// 单次回答的最大输出 token 数
    pub llm_max_tokens: u32,
    /// 采样温度，保持较低以获得稳定输出
    pub llm_temperature: f32,
    // --- 流程策略 ---
    /// 批量模式下某个问题失败后是否继续处理剩余问题
    pub continue_on_error: bool,
    /// 是否删除回答结尾的"总结 / 结论"句
    pub strip_conclusions: bool,
    // --- 访问控制 ---
    /// 共享访问密码，未设置时不做校验
    pub app_password: Option<String>,
    // --- 更正存储 ---
    pub correction_store_url: Option<String>,
    pub correction_store_key: Option<String>,
    pub correction_store_key_header: String,
    /// 下载文件路径
    pub output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_max_tokens: 800,
            llm_temperature: 0.1,
            continue_on_error: false,
            strip_conclusions: false,
            app_password: None,
            correction_store_url: None,
            correction_store_key: None,
            correction_store_key_header: "X-Master-Key".to_string(),
            output_file: "RFP_Responses.xlsx".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺失的键使用默认值，之后再叠加环境变量
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_max_tokens),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_temperature),
            continue_on_error: std::env::var("CONTINUE_ON_ERROR").ok().and_then(|v| v.parse().ok()).unwrap_or(self.continue_on_error),
            strip_conclusions: std::env::var("STRIP_CONCLUSIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.strip_conclusions),
            app_password: std::env::var("APP_PASSWORD").ok().or(self.app_password),
            correction_store_url: std::env::var("CORRECTION_STORE_URL").ok().or(self.correction_store_url),
            correction_store_key: std::env::var("CORRECTION_STORE_KEY").ok().or(self.correction_store_key),
            correction_store_key_header: std::env::var("CORRECTION_STORE_KEY_HEADER").unwrap_or(self.correction_store_key_header),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(self.output_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}
