//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 负责一次提交从头到尾的调度：
//! - 访问校验
//! - 输入模式判定
//! - 批量模式下解析表格、定位问题列
//! - 逐个、顺序地调用回答流程（不并发）
//! - 按失败策略决定中止或继续
//! - 答案数量完整时回填表格，生成下载内容
//!
//! ## 层次关系
//!
//! ```text
//! submission_processor (处理 Vec<Question>)
//!     ↓
//! workflow::AnswerFlow (处理单个 Question)
//!     ↓
//! services (能力层：prompt / llm / sanitizer / corrections / export)
//! ```

pub mod submission_processor;

pub use submission_processor::{
    AnswerSink, QuestionFailure, SubmissionOutcome, SubmissionProcessor,
};
