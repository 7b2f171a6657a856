//! # RFP Answer Assistant
//!
//! 一个用于批量生成 RFP/RFI 技术回答的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 提交请求、产品目录、表格、问题
//! - `loaders` - 上传文件 -> `Table`，TOML -> 提交请求
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个问题或单张表格
//! - `ColumnReference` - 列字母定位
//! - `LlmService` - 聊天补全调用（`AnswerCollaborator`）
//! - `Sanitizer` - 回答清洗
//! - `CorrectionStore` - 更正库读写
//! - `AccessGate` - 共享密码校验
//! - `export_writer` - 回填 Answers 列并导出 xlsx
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 输入模式判定 + "一个问题"的完整回答流程
//! - `QuestionCtx` - 上下文封装（序号 + 客户 + 产品）
//! - `AnswerFlow` - 流程编排（更正库 → 提示词 → LLM → 清洗）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/submission_processor` - 单次提交处理器，顺序处理全部问题

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Answer, AnswerSource, Product, Question, SubmissionRequest, Table, UploadedFile};
pub use orchestrator::{AnswerSink, SubmissionOutcome, SubmissionProcessor};
pub use services::{AnswerCollaborator, CompletionRequest, CorrectionStore, Corrections, LlmService};
pub use workflow::{InputMode, QuestionCtx};
