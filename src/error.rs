use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for local failures (argument validation, configuration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// JSON pointer or configuration key that caused the error (e.g., "/docId", "CODA_API_TOKEN")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., a tool name, "config")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed failure reported by the Coda API for a non-2xx response.
///
/// Built by [`crate::client::error_classification::classify_status`]; the
/// `Display` form is the resolved human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Authentication { message: String },

    #[error("{message}")]
    Permission { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    RateLimit {
        message: String,
        /// `Retry-After` hint in seconds, when the response carried one.
        retry_after: Option<u64>,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Server { message: String, status: u16 },

    #[error("{message}")]
    Generic {
        message: String,
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: Option<String>,
    },
}

impl ApiError {
    /// HTTP status code the error was classified from.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Authentication { .. } => 401,
            ApiError::Permission { .. } => 403,
            ApiError::NotFound { .. } => 404,
            ApiError::RateLimit { .. } => 429,
            ApiError::Validation { .. } => 400,
            ApiError::Server { status, .. } | ApiError::Generic { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Authentication { message }
            | ApiError::Permission { message }
            | ApiError::NotFound { message }
            | ApiError::RateLimit { message, .. }
            | ApiError::Validation { message }
            | ApiError::Server { message, .. }
            | ApiError::Generic { message, .. } => message,
        }
    }

    /// Seconds to wait before retrying, only ever set for rate-limit errors.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ApiError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Stable snake_case class name (e.g., `"not_found"`), used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::Authentication { .. } => "authentication",
            ApiError::Permission { .. } => "permission_denied",
            ApiError::NotFound { .. } => "not_found",
            ApiError::RateLimit { .. } => "rate_limited",
            ApiError::Validation { .. } => "invalid_request",
            ApiError::Server { .. } => "server_error",
            ApiError::Generic { .. } => "other",
        }
    }

    /// Whether a later identical request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::RateLimit { .. } | ApiError::Server { .. })
    }
}

/// Unified error type for the Coda MCP server.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// The upstream API error, when the failure came from a non-2xx response.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}
