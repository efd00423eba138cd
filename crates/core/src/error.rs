#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Malformed settings payload: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
