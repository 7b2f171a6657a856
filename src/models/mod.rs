pub mod loaders;
pub mod product;
pub mod question;
pub mod request;
pub mod table;

pub use loaders::{load_request_file, load_table, RequestFile};
pub use product::{Product, DEFAULT_PRODUCT};
pub use question::{Answer, AnswerSource, Question};
pub use request::{SubmissionRequest, UploadedFile};
pub use table::Table;
