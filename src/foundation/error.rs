/// Crate-wide result alias.
pub type TilemixResult<T> = Result<T, TilemixError>;

/// Errors produced by the blend pipeline.
///
/// `Argument` is raised synchronously while a job is being validated; the
/// remaining variants surface asynchronously through the job's completion
/// handle. The `Display` form carries the message verbatim, with no category
/// prefix, because callers surface it directly.
#[derive(thiserror::Error, Debug)]
pub enum TilemixError {
    /// Malformed layers or option values, rejected before any work is queued.
    #[error("{0}")]
    Argument(String),

    /// A layer could not be identified or decoded.
    #[error("{0}")]
    Decode(String),

    /// The orchestrated canvas dimensions are unusable.
    #[error("{0}")]
    Dimension(String),

    /// The canvas buffer could not be allocated.
    #[error("{0}")]
    Allocation(String),

    /// The selected encoder failed or panicked.
    #[error("{0}")]
    Encode(String),

    /// Any other failure, carried with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TilemixError {
    /// Build an [`TilemixError::Argument`].
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Build an [`TilemixError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build an [`TilemixError::Dimension`].
    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::Dimension(msg.into())
    }

    /// Build an [`TilemixError::Allocation`].
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build an [`TilemixError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
