pub mod access_gate;
pub mod column_locator;
pub mod correction_store;
pub mod export_writer;
pub mod llm_service;
pub mod prompt;
pub mod sanitizer;

pub use access_gate::AccessGate;
pub use column_locator::{extract_questions, ColumnReference};
pub use correction_store::{load_corrections_or_empty, CorrectionStore, Corrections};
pub use export_writer::{reassemble, ExportTable, ANSWERS_HEADER};
pub use llm_service::{AnswerCollaborator, CompletionRequest, LlmService};
pub use prompt::build_answer_prompt;
pub use sanitizer::Sanitizer;
