use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Classifier training requires a non-empty corpus")]
    InvalidCorpus,

    #[error("Complaint '{id}' not found")]
    ComplaintNotFound { id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TriageResult<T> = Result<T, TriageError>;
