use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{message}")]
    UpstreamError {
        /// Pipeline step that failed ("profile", "country", "rates", "news").
        step: String,
        message: String,
        /// Upstream response body, when one was received.
        details: Option<serde_json::Value>,
        /// URL of the call that failed, best effort.
        url: Option<String>,
    },
}

impl AggregateError {
    pub fn upstream(step: &str, message: impl Into<String>) -> Self {
        Self::UpstreamError {
            step: step.to_string(),
            message: message.into(),
            details: None,
            url: None,
        }
    }

    pub fn upstream_with_body(
        step: &str,
        message: impl Into<String>,
        details: serde_json::Value,
        url: impl Into<String>,
    ) -> Self {
        Self::UpstreamError {
            step: step.to_string(),
            message: message.into(),
            details: Some(details),
            url: Some(url.into()),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Best-effort identification of the failing call for error responses.
    pub fn step(&self) -> String {
        match self {
            Self::TransportError(e) => e
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "Unknown step".to_string()),
            Self::UpstreamError { url, step, .. } => {
                url.clone().unwrap_or_else(|| step.clone())
            }
            Self::ConfigError { .. } => "configuration".to_string(),
            Self::SerializationError(_) => "Unknown step".to_string(),
        }
    }

    /// Upstream response body to include in error responses.
    pub fn details(&self) -> serde_json::Value {
        match self {
            Self::UpstreamError {
                details: Some(body),
                ..
            } => body.clone(),
            _ => serde_json::Value::String("No additional details".to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
