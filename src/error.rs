use thiserror::Error;

/// Top-level error type for the insole editor core.
#[derive(Debug, Error)]
pub enum SoleformError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Contour(#[from] ContourError),

    #[error(transparent)]
    Interaction(#[from] InteractionError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while acquiring contour data from an external source.
#[derive(Debug, Error)]
pub enum ContourError {
    #[error("failed to read contour source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed contour data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors related to the picking and drag lifecycle.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("handle {0} is already being dragged")]
    DragInProgress(&'static str),
}

/// Errors related to scene resources owned by the core.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene node not found: {0}")]
    NodeNotFound(String),
}

/// Errors related to editor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`SoleformError`].
pub type Result<T> = std::result::Result<T, SoleformError>;
