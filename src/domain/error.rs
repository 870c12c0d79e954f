use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Kept for completeness of the taxonomy. The keyword classifier always
    /// resolves to a label, so nothing in this crate produces it.
    #[error("Ambiguous classification: {message}")]
    ClassificationAmbiguous { message: String },

    #[error("{origin} unavailable: {message}")]
    AdapterUnavailable { origin: String, message: String },

    #[error("{origin} could not answer: {message}")]
    AdapterRejected { origin: String, message: String },

    #[error("Cache unavailable: {message}")]
    CacheUnavailable { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unavailable(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AdapterUnavailable {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn rejected(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AdapterRejected {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Re-attributes an adapter failure to the source that was asked.
    ///
    /// The backend that actually failed (e.g. `ollama`) is kept as a prefix of
    /// the message. Internal and configuration errors raised while answering
    /// become unavailability of that source. Other kinds are returned unchanged.
    pub fn with_origin(self, origin: &str) -> Self {
        match self {
            Self::Internal { message } | Self::Configuration { message } => {
                Self::AdapterUnavailable {
                    origin: origin.to_string(),
                    message,
                }
            }
            Self::AdapterUnavailable {
                origin: backend,
                message,
            } if backend != origin => Self::AdapterUnavailable {
                origin: origin.to_string(),
                message: format!("{}: {}", backend, message),
            },
            Self::AdapterRejected {
                origin: backend,
                message,
            } if backend != origin => Self::AdapterRejected {
                origin: origin.to_string(),
                message: format!("{}: {}", backend, message),
            },
            other => other,
        }
    }

    /// The failing source for adapter errors
    pub fn origin(&self) -> Option<&str> {
        match self {
            Self::AdapterUnavailable { origin, .. } | Self::AdapterRejected { origin, .. } => {
                Some(origin)
            }
            _ => None,
        }
    }

    /// Short machine-readable kind, used for metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::ClassificationAmbiguous { .. } => "classification_ambiguous",
            Self::AdapterUnavailable { .. } => "adapter_unavailable",
            Self::AdapterRejected { .. } => "adapter_rejected",
            Self::CacheUnavailable { .. } => "cache_unavailable",
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation",
            Self::Configuration { .. } => "configuration",
            Self::Internal { .. } => "internal",
        }
    }
}
