//! Inference module
//!
//! The prediction chain is scaler → classifier → label codec. Each stage is
//! reached through a narrow capability trait so the loaded artifacts can be
//! swapped for fakes:
//! - [`FeatureScaler`] normalizes a raw feature vector
//! - [`Classifier`] maps a normalized vector to a class index
//! - [`LabelCodec`] maps between class indices and class names
//!
//! [`ArtifactContext`] holds one of each, loaded once and shared read-only.

mod config;
mod context;

pub use config::{ArtifactPaths, ENCODER_FILE, MODEL_FILE, SCALER_FILE};
pub use context::{ArtifactContext, ArtifactSummary};

use crate::error::{IrisError, Result};
use crate::models::RandomForest;
use crate::preprocessing::{LabelEncoder, Scaler};
use ndarray::{Array1, ArrayView1};

/// Normalizes raw features with parameters learned during training
pub trait FeatureScaler: Send + Sync {
    /// Number of features the scaler expects
    fn n_features(&self) -> usize;

    fn transform(&self, x: ArrayView1<f64>) -> Result<Array1<f64>>;
}

/// Maps a normalized feature vector to a class index
pub trait Classifier: Send + Sync {
    /// Number of features the classifier expects
    fn n_features(&self) -> usize;

    /// Every class index `predict` can return
    fn class_indices(&self) -> Vec<usize>;

    fn predict(&self, x: ArrayView1<f64>) -> Result<usize>;
}

/// Maps between class indices and human-readable class names
pub trait LabelCodec: Send + Sync {
    fn n_classes(&self) -> usize;

    fn decode(&self, index: usize) -> Result<&str>;

    fn encode(&self, label: &str) -> Result<usize>;
}

impl FeatureScaler for Scaler {
    fn n_features(&self) -> usize {
        Scaler::n_features(self)
    }

    fn transform(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.transform_row(x)
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        RandomForest::n_features(self)
    }

    fn class_indices(&self) -> Vec<usize> {
        // validated on load: non-negative and integral
        self.classes().iter().map(|&c| c as usize).collect()
    }

    fn predict(&self, x: ArrayView1<f64>) -> Result<usize> {
        let class = self.predict_row(x)?;
        if class < 0.0 || class.fract() != 0.0 {
            return Err(IrisError::InvalidArtifact(format!(
                "classifier produced non-index value {}",
                class
            )));
        }
        Ok(class as usize)
    }
}

impl LabelCodec for LabelEncoder {
    fn n_classes(&self) -> usize {
        LabelEncoder::n_classes(self)
    }

    fn decode(&self, index: usize) -> Result<&str> {
        self.inverse_transform(index)
    }

    fn encode(&self, label: &str) -> Result<usize> {
        self.transform(label)
    }
}
