pub mod account;
pub mod analysis;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod formatter;

pub use account::Account;
pub use analysis::SortOrder;
pub use error::AnalysisError;
pub use file_manager::{FileManager, JsonFileManager, SaveOptions};
