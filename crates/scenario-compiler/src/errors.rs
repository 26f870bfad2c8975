//! Error types for scenario compilation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// Writing the test source template failed
    #[error("failed to render test source: {0}")]
    Render(#[from] std::fmt::Error),

    /// Emitter configuration cannot produce a valid test
    #[error("invalid emitter configuration: {0}")]
    InvalidConfig(String),
}

pub type CompileResult<T> = Result<T, CompileError>;
