use thiserror::Error;

/// Errors surfaced by the repository layer.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("document store error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] bson::ser::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("{0} not found")]
    NotFound(&'static str),
}
