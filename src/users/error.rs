use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    /// Missing or malformed input, or an email that is already registered
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Unknown email or wrong password. Deliberately not told apart.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl UserError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound("User not found".to_string())
    }

    pub fn email_taken() -> Self {
        Self::Validation("Email is already registered".to_string())
    }
}
