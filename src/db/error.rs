use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Record not found")]
    NotFound,

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database connection error: {0}")]
    ConnectionError(String),
}
