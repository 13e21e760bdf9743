use std::path::PathBuf;

/// Convenience result type used across ridereel.
pub type RideResult<T> = Result<T, RideError>;

/// Top-level error taxonomy.
///
/// Setup failures (`Corpus`, `Validation`, background or font `Io`) abort a run before any frame is
/// rendered. Frame-level `Io`/`Encode` failures are routed through
/// [`FrameErrorPolicy`](crate::FrameErrorPolicy).
#[derive(thiserror::Error, Debug)]
pub enum RideError {
    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The ride index or a track could not be read or parsed.
    #[error("corpus error: {0}")]
    Corpus(String),

    /// Filesystem failure tied to a specific path.
    #[error("io error at '{}': {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Image decoding or encoding failure.
    #[error("image codec error: {0}")]
    Encode(String),

    /// Font loading or glyph rasterization failure.
    #[error("text error: {0}")]
    Text(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RideError {
    /// Build a [`RideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RideError::Corpus`] value.
    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus(msg.into())
    }

    /// Build a [`RideError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`RideError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`RideError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
