use thiserror::Error;

/// Errors that can occur while persisting or restoring the canvas raster
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize canvas metadata: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access canvas storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode canvas image: {0}")]
    Image(#[from] image::ImageError),

    #[error("No stored canvas under key '{0}'")]
    NotFound(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors raised while loading an [`EditorConfig`](crate::config::EditorConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed editor configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Minimum canvas dimensions must be non-zero, got {width}x{height}")]
    ZeroMinimum { width: u32, height: u32 },

    #[error("Anchor offset must be finite and non-negative, got {0}")]
    InvalidAnchorOffset(f32),

    #[error("Storage key must not be empty")]
    EmptyStorageKey,
}
