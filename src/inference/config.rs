//! Artifact location configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the serialized classifier
pub const MODEL_FILE: &str = "rf_model.json";
/// File name of the serialized feature scaler
pub const SCALER_FILE: &str = "features_scaler.json";
/// File name of the serialized label encoder
pub const ENCODER_FILE: &str = "label_encoder.json";

/// Where the three startup artifacts live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Trained classifier
    pub model: PathBuf,

    /// Fitted feature scaler
    pub scaler: PathBuf,

    /// Fitted label encoder
    pub encoder: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl ArtifactPaths {
    /// The fixed artifact file names, resolved inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            scaler: dir.join(SCALER_FILE),
            encoder: dir.join(ENCODER_FILE),
        }
    }
}
