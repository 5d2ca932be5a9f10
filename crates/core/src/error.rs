/// Result alias that carries the custom [`ShowcaseError`] type.
pub type Result<T> = std::result::Result<T, ShowcaseError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum ShowcaseError {
    /// Rejected construction input: an empty stage list, a non-positive dwell
    /// or animation duration, and similar. Nothing fails after construction,
    /// so this is the only domain error the crate produces.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Wrapper around standard IO errors raised by the schedule export path.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around serialization errors from the schedule export path.
    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}

impl ShowcaseError {
    /// Creates a [`ShowcaseError::InvalidConfiguration`] from a message.
    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
