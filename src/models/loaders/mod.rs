pub mod table_loader;
pub mod toml_loader;

pub use table_loader::load_table;
pub use toml_loader::{load_request_file, RequestFile};
