use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad or missing user input; never reaches an upstream call
    #[error("{0}")]
    Validation(String),

    /// A required credential is not configured
    #[error("{0} API key not configured")]
    Configuration(String),

    /// The catalog has no item with this id
    #[error("Video not found")]
    NotFound(String),

    /// Transport, HTTP status or response-shape failure from an upstream service
    #[error("{service} API error: {message}")]
    Provider { service: String, message: String },

    /// Failure reported by a tubetitles server, carrying its `error` text as-is
    #[error("{0}")]
    Server(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn provider(service: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Provider {
            service: service.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_mentions_configuration() {
        let err = Error::Configuration("Anthropic".to_string());
        assert_eq!(err.to_string(), "Anthropic API key not configured");
    }

    #[test]
    fn test_provider_message() {
        let err = Error::provider("YouTube", "Forbidden");
        assert_eq!(err.to_string(), "YouTube API error: Forbidden");
    }

    #[test]
    fn test_not_found_is_distinct_from_provider() {
        let not_found = Error::NotFound("abc".to_string());
        let provider = Error::provider("YouTube", "Bad Gateway");
        assert!(matches!(not_found, Error::NotFound(_)));
        assert!(!matches!(provider, Error::NotFound(_)));
    }
}
