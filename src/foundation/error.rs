/// Convenience result type used across gridveil.
pub type VeilResult<T> = Result<T, VeilError>;

/// Construction-time error taxonomy.
///
/// Runtime conditions (a tile or image that went away, an unmeasurable rect) are not
/// errors; they degrade to no-ops and are only logged.
#[derive(thiserror::Error, Debug)]
pub enum VeilError {
    /// Invalid user-provided geometry or grid data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A reveal configuration that cannot drive a choreography.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VeilError {
    /// Build a [`VeilError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VeilError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`VeilError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
