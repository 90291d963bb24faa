pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid tree: {message}")]
    InvalidTree { message: String },

    #[error("Invalid chart config: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
