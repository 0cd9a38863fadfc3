use thiserror::Error;

/// Application-wide error type covering every failure that aborts a run.
///
/// Per-destination delivery failures are not represented here: providers
/// report them through `NotificationResult` so the remaining destinations
/// are still attempted.
#[derive(Error, Debug)]
pub enum AppError {
    /// A positional argument could not be decoded
    #[error("Invalid {argument} argument: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// A destination asked for a body format the caller did not render
    #[error("No body was provided for format '{format}'")]
    MissingBodyFormat { format: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The service URL scheme has no provider
    #[error("Unsupported service: {scheme}")]
    UnsupportedService { scheme: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
