/// Convenience result type used across stackface.
pub type FaceResult<T> = Result<T, FaceError>;

/// Top-level error taxonomy used by renderer, modifier and surface APIs.
#[derive(thiserror::Error, Debug)]
pub enum FaceError {
    /// Invalid configuration or a surface that cannot host the renderer.
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any state was touched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A modifier failed while mutating the current face state.
    #[error("modifier error: {0}")]
    Modifier(String),

    /// A decorator failed while drawing or erasing its overlay.
    #[error("decorator error: {0}")]
    Decorator(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FaceError {
    /// Build a [`FaceError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FaceError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`FaceError::Modifier`] value.
    pub fn modifier(msg: impl Into<String>) -> Self {
        Self::Modifier(msg.into())
    }

    /// Build a [`FaceError::Decorator`] value.
    pub fn decorator(msg: impl Into<String>) -> Self {
        Self::Decorator(msg.into())
    }

    /// Build a [`FaceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
