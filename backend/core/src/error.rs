use thiserror::Error;

/// Top-level error type for the Paddock agent.
#[derive(Debug, Error)]
pub enum PaddockError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("LLM provider error ({provider}): {message}")]
    LlmError { provider: String, message: String },

    #[error("sentiment analysis failed: {0}")]
    Sentiment(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaddockError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Short machine-readable kind, used in logs and error envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Generation(_) => "generation",
            Self::LlmError { .. } => "llm",
            Self::Sentiment(_) => "sentiment",
            Self::ConfigError(_) => "config",
            Self::Other(_) => "internal",
        }
    }
}

pub type Result<T, E = PaddockError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = PaddockError::validation("circuit 'nurburgring' is unknown");
        assert_eq!(
            err.to_string(),
            "validation failed: circuit 'nurburgring' is unknown"
        );
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn anyhow_converts_to_other() {
        let err: PaddockError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(err.kind(), "internal");
        assert_eq!(err.to_string(), "disk on fire");
    }
}
