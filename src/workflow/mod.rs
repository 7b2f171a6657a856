pub mod answer_flow;
pub mod input_resolver;
pub mod question_ctx;

pub use answer_flow::AnswerFlow;
pub use input_resolver::{resolve, InputMode};
pub use question_ctx::QuestionCtx;
