//! Loaded artifact context
//!
//! Owns the scaler, classifier and label codec for the lifetime of the process.
//! Construction is the only place the three are checked against each other.

use super::{ArtifactPaths, Classifier, FeatureScaler, LabelCodec};
use crate::error::{ArtifactKind, IrisError, PredictionError, StartupError};
use crate::models::RandomForest;
use crate::preprocessing::{LabelEncoder, Scaler, ScalerType};
use ndarray::ArrayView1;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Descriptive facts about the loaded artifacts
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    pub n_features: usize,
    pub scaler_type: Option<ScalerType>,
    pub n_trees: Option<usize>,
    pub labels: Vec<String>,
}

/// Read-only bundle of scaler, classifier and codec shared by every prediction
pub struct ArtifactContext {
    scaler: Box<dyn FeatureScaler>,
    classifier: Box<dyn Classifier>,
    codec: Box<dyn LabelCodec>,
    class_indices: Vec<usize>,
    summary: ArtifactSummary,
}

impl std::fmt::Debug for ArtifactContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactContext")
            .field("summary", &self.summary)
            .finish()
    }
}

fn load_artifact<T>(
    kind: ArtifactKind,
    path: &Path,
    load: impl FnOnce(&str) -> crate::Result<T>,
) -> Result<T, StartupError> {
    let wrap = |source: IrisError| StartupError::Artifact {
        kind,
        path: path.to_path_buf(),
        source,
    };
    let path_str = path
        .to_str()
        .ok_or_else(|| wrap(IrisError::InvalidInput("artifact path is not valid UTF-8".to_string())))?;
    load(path_str).map_err(wrap)
}

impl ArtifactContext {
    /// Load the classifier, scaler and encoder and check they fit together
    pub fn load(paths: &ArtifactPaths) -> Result<Self, StartupError> {
        let start = Instant::now();

        let classifier = load_artifact(ArtifactKind::Classifier, &paths.model, RandomForest::load)?;
        let scaler = load_artifact(ArtifactKind::Scaler, &paths.scaler, Scaler::load)?;
        let encoder = load_artifact(ArtifactKind::Encoder, &paths.encoder, LabelEncoder::load)?;

        let scaler_type = scaler.scaler_type();
        let n_trees = classifier.n_trees();

        let mut context = Self::from_parts(Box::new(scaler), Box::new(classifier), Box::new(encoder))?;
        context.summary.scaler_type = Some(scaler_type);
        context.summary.n_trees = Some(n_trees);

        info!(
            model = %paths.model.display(),
            scaler = %paths.scaler.display(),
            encoder = %paths.encoder.display(),
            n_trees = n_trees,
            labels = ?context.summary.labels,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Artifacts loaded"
        );

        Ok(context)
    }

    /// Bundle arbitrary implementations, checking that their shapes agree
    pub fn from_parts(
        scaler: Box<dyn FeatureScaler>,
        classifier: Box<dyn Classifier>,
        codec: Box<dyn LabelCodec>,
    ) -> Result<Self, StartupError> {
        let n_features = crate::form::N_FEATURES;

        if scaler.n_features() != n_features {
            return Err(StartupError::Inconsistent(format!(
                "scaler expects {} features, the form provides {}",
                scaler.n_features(),
                n_features
            )));
        }
        if classifier.n_features() != n_features {
            return Err(StartupError::Inconsistent(format!(
                "classifier expects {} features, the form provides {}",
                classifier.n_features(),
                n_features
            )));
        }

        let class_indices = classifier.class_indices();
        let mut labels = Vec::with_capacity(class_indices.len());
        for &index in &class_indices {
            let label = codec.decode(index).map_err(|_| {
                StartupError::Inconsistent(format!(
                    "classifier can emit class {} but the label encoder knows {} classes",
                    index,
                    codec.n_classes()
                ))
            })?;
            labels.push(label.to_string());
        }

        Ok(Self {
            scaler,
            classifier,
            codec,
            class_indices,
            summary: ArtifactSummary {
                n_features,
                scaler_type: None,
                n_trees: None,
                labels,
            },
        })
    }

    pub fn summary(&self) -> &ArtifactSummary {
        &self.summary
    }

    /// Class indices the classifier can emit, in the same order as `labels`
    pub fn class_indices(&self) -> &[usize] {
        &self.class_indices
    }

    /// Labels the classifier can produce
    pub fn labels(&self) -> &[String] {
        &self.summary.labels
    }

    pub fn codec(&self) -> &dyn LabelCodec {
        self.codec.as_ref()
    }

    /// Scale, classify and decode one raw feature vector
    pub fn predict_label(&self, features: ArrayView1<f64>) -> Result<String, PredictionError> {
        let scaled = self.scaler.transform(features)?;
        let index = self.classifier.predict(scaled.view())?;
        let label = self.codec.decode(index)?;

        debug!(features = ?features.to_vec(), class = index, label = %label, "Prediction");
        Ok(label.to_string())
    }
}
