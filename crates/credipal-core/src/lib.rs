pub mod amortization;
pub mod assumptions;
pub mod error;
pub mod types;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "plan")]
pub mod plan;

pub use assumptions::Assumptions;
pub use error::CredipalError;
pub use types::*;

/// Standard result type for all credipal operations
pub type CredipalResult<T> = Result<T, CredipalError>;
