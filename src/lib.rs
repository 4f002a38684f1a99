//! Iris flower prediction form
//!
//! Loads a pre-trained feature scaler, random forest classifier and label
//! encoder once at startup, then turns four slider values into a species name.
//!
//! # Modules
//!
//! - [`preprocessing`] - Fitted feature scaler and label encoder
//! - [`models`] - Decision tree and random forest inference
//! - [`inference`] - Capability traits and the shared artifact context
//! - [`form`] - Slider inputs, the render pass and the form lifecycle
//! - [`server`] - HTTP server for the form page and JSON API
//! - [`cli`] - Command-line interface

pub mod error;

pub mod preprocessing;
pub mod models;
pub mod inference;
pub mod form;

pub mod server;
pub mod cli;

pub use error::{IrisError, PredictionError, Result, StartupError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ArtifactKind, IrisError, PredictionError, Result, StartupError};
    pub use crate::preprocessing::{LabelEncoder, Scaler, ScalerParams, ScalerType};
    pub use crate::models::{DecisionTree, RandomForest, TreeNode};
    pub use crate::inference::{ArtifactContext, ArtifactPaths, Classifier, FeatureScaler, LabelCodec};
    pub use crate::form::{
        predict_on_current_inputs, render, Feature, FormInputs, FormOutput, FormState, PredictionDisplay,
    };
}
