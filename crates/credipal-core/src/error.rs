use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredipalError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid payment: {context}")]
    InvalidPayment { context: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CredipalError {
    fn from(e: serde_json::Error) -> Self {
        CredipalError::SerializationError(e.to_string())
    }
}
