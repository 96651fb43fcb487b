use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("IO error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json error occurred: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Missing field `{field}`")]
    MissingField { field: String },

    #[error("Invalid value for field `{field}`: {value}")]
    InvalidField { field: String, value: String },

    #[error("Config error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
