//! Error types for the prediction form

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, IrisError>;

/// Main error type for artifact loading, preprocessing and inference
#[derive(Error, Debug)]
pub enum IrisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Unknown class index: {0}")]
    UnknownClass(usize),

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Template error: {0}")]
    TemplateError(String),
}

impl From<serde_json::Error> for IrisError {
    fn from(err: serde_json::Error) -> Self {
        IrisError::SerializationError(err.to_string())
    }
}

impl From<minijinja::Error> for IrisError {
    fn from(err: minijinja::Error) -> Self {
        IrisError::TemplateError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for IrisError {
    fn from(err: ndarray::ShapeError) -> Self {
        IrisError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

/// Which of the three startup artifacts an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Classifier,
    Scaler,
    Encoder,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArtifactKind::Classifier => "classifier",
            ArtifactKind::Scaler => "feature scaler",
            ArtifactKind::Encoder => "label encoder",
        };
        f.write_str(name)
    }
}

/// Fatal error raised while moving the form from `Loading` to `Ready`
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to load {kind} from {}: {source}", path.display())]
    Artifact {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: IrisError,
    },

    #[error("artifacts are inconsistent: {0}")]
    Inconsistent(String),
}

/// Failure of a single render pass; shown inline, never fatal
#[derive(Error, Debug)]
#[error("Prediction failed: {0}")]
pub struct PredictionError(#[from] pub IrisError);
