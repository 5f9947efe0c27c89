/// Convenience result type used across autoscale.
pub type AutoscaleResult<T> = Result<T, AutoscaleError>;

/// Top-level error taxonomy used by engine, store and resolver APIs.
///
/// Every variant is reported synchronously and is fatal to the operation that raised it.
#[derive(thiserror::Error, Debug)]
pub enum AutoscaleError {
    /// Non-positive or non-finite design size, screen dimension or scale factor.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A second `init` on an already initialized configuration store.
    #[error("already initialized: {0}")]
    AlreadyInitialized(String),

    /// Global design width/height queried before it was configured.
    #[error("missing design size: {0}")]
    MissingDesignSize(String),

    /// Profile or context used before `init`.
    #[error("not initialized: {0}")]
    NotInitialized(String),

    /// Engine operation invoked off the coordination thread.
    #[error("concurrency violation: {0}")]
    ConcurrencyViolation(String),

    /// Errors when serializing or deserializing manifests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AutoscaleError {
    /// Build an [`AutoscaleError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build an [`AutoscaleError::AlreadyInitialized`] value.
    pub fn already_initialized(msg: impl Into<String>) -> Self {
        Self::AlreadyInitialized(msg.into())
    }

    /// Build an [`AutoscaleError::MissingDesignSize`] value.
    pub fn missing_design_size(msg: impl Into<String>) -> Self {
        Self::MissingDesignSize(msg.into())
    }

    /// Build an [`AutoscaleError::NotInitialized`] value.
    pub fn not_initialized(msg: impl Into<String>) -> Self {
        Self::NotInitialized(msg.into())
    }

    /// Build an [`AutoscaleError::ConcurrencyViolation`] value.
    pub fn concurrency_violation(msg: impl Into<String>) -> Self {
        Self::ConcurrencyViolation(msg.into())
    }

    /// Build an [`AutoscaleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
