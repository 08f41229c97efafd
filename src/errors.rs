use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Update must set at least one field")]
    EmptyUpdate,

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl FilterError {
    pub(crate) fn structural(msg: impl Into<String>) -> Self {
        Self::Structural(msg.into())
    }
}
