use std::error::Error as StdError;

/// Crate-wide result type for channel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed outcomes shared by every channel action.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required identity or credential is missing from integration state.
    /// Not recoverable without operator intervention.
    #[error("channel configuration error: {message}")]
    Configuration { message: String },

    /// Caller-supplied input fails a structural rule of the network.
    #[error("invalid channel input: {message}")]
    Validation { message: String },

    /// The action is disallowed under the current configuration mode.
    #[error("channel policy violation: {message}")]
    Policy { message: String },

    /// The network rejected or failed an outbound send. The raw upstream
    /// error content is embedded in the message; transient vs permanent is
    /// left for the operator to judge.
    #[error("message dispatch failed: {message}")]
    Dispatch { message: String },

    /// Wrapped source error from an external capability (store, state).
    #[error("channel operation failed: {context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn configuration(message: impl std::fmt::Display) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn validation(message: impl std::fmt::Display) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn policy(message: impl std::fmt::Display) -> Self {
        Self::Policy {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn dispatch(message: impl std::fmt::Display) -> Self {
        Self::Dispatch {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
