use crate::playback::instance::InstanceId;

/// Convenience result type used across Flipbook.
pub type FlipbookResult<T> = Result<T, FlipbookError>;

/// Top-level error taxonomy used by the playback core.
#[derive(thiserror::Error, Debug)]
pub enum FlipbookError {
    /// Lookup of a template name that is not in the registry.
    #[error("unknown template '{0}'")]
    TemplateNotFound(String),

    /// Lookup of an instance id that is not (or no longer) in the table.
    #[error("unknown instance {0}")]
    InstanceNotFound(InstanceId),

    /// The frame source could not produce a valid frame sequence.
    #[error("decode error: {0}")]
    Decode(String),

    /// Failure reading or writing the persisted catalog blob.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipbookError {
    /// Build a [`FlipbookError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FlipbookError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`FlipbookError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
