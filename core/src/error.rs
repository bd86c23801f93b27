use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Run cancelled at step {step}")]
    Cancelled { step: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        SimError::InvalidInput {
            field:  field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
