use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AdapterError {
    /// Errors caused by the caller's request rather than the host
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AdapterError::InvalidArgument(_) | AdapterError::UnknownTool(_)
        )
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_mistakes_are_client_errors() {
        assert!(AdapterError::InvalidArgument("spec".into()).is_client_error());
        assert!(AdapterError::UnknownTool("nope".into()).is_client_error());
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(!AdapterError::from(io).is_client_error());
    }
}
