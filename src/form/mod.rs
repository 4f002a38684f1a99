//! Prediction form
//!
//! Four bounded sliders in, one decoded label out. Every interaction reruns
//! [`render`] from scratch; it reads nothing but its arguments, so the same
//! inputs and artifacts always produce the same output.

mod page;
mod state;

pub use page::render_page;
pub use state::FormState;

use crate::error::{IrisError, PredictionError, Result};
use crate::inference::ArtifactContext;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of features the form collects
pub const N_FEATURES: usize = 4;

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10.0;
pub const SLIDER_DEFAULT: f64 = 5.0;
pub const SLIDER_STEP: f64 = 0.01;

pub const TITLE: &str = "Iris Flower Prediction App";
pub const DESCRIPTION: &str = "This app predicts the **Iris flower** type!";
pub const PREDICTION_HEADER: &str = "Prediction";
pub const PREDICTION_LEAD: &str = "The predicted Iris flower type is:";

/// One flower measurement, in feature-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Feature {
    pub const ALL: [Feature; N_FEATURES] = [
        Feature::SepalLength,
        Feature::SepalWidth,
        Feature::PetalLength,
        Feature::PetalWidth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Feature::SepalLength => "Sepal Length",
            Feature::SepalWidth => "Sepal Width",
            Feature::PetalLength => "Petal Length",
            Feature::PetalWidth => "Petal Width",
        }
    }

    /// Query / JSON field name
    pub fn key(self) -> &'static str {
        match self {
            Feature::SepalLength => "sepal_length",
            Feature::SepalWidth => "sepal_width",
            Feature::PetalLength => "petal_length",
            Feature::PetalWidth => "petal_width",
        }
    }
}

/// A slider as shown on the page, with its current value
#[derive(Debug, Clone, Serialize)]
pub struct SliderSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub prompt: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    pub value: f64,
}

/// Current slider positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormInputs {
    values: [f64; N_FEATURES],
}

impl Default for FormInputs {
    fn default() -> Self {
        Self {
            values: [SLIDER_DEFAULT; N_FEATURES],
        }
    }
}

impl FormInputs {
    /// Accept values only if every one lies within the slider bounds
    pub fn new(values: [f64; N_FEATURES]) -> Result<Self> {
        for (feature, &v) in Feature::ALL.iter().zip(values.iter()) {
            if !v.is_finite() || !(SLIDER_MIN..=SLIDER_MAX).contains(&v) {
                return Err(IrisError::InvalidInput(format!(
                    "{} must be between {} and {}, got {}",
                    feature.label(),
                    SLIDER_MIN,
                    SLIDER_MAX,
                    v
                )));
            }
        }
        Ok(Self { values })
    }

    /// Pin each value to the slider bounds, as a range control would
    pub fn clamped(values: [f64; N_FEATURES]) -> Self {
        let values = values.map(|v| {
            if v.is_nan() {
                SLIDER_DEFAULT
            } else {
                v.clamp(SLIDER_MIN, SLIDER_MAX)
            }
        });
        Self { values }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature as usize]
    }

    pub fn values(&self) -> [f64; N_FEATURES] {
        self.values
    }

    /// Ordered feature vector for the scaler
    pub fn to_feature_vector(&self) -> Array1<f64> {
        Array1::from_vec(self.values.to_vec())
    }

    pub fn sliders(&self) -> Vec<SliderSpec> {
        Feature::ALL
            .iter()
            .map(|&feature| SliderSpec {
                key: feature.key(),
                label: feature.label(),
                prompt: format!("Select {}:", feature.label()),
                min: SLIDER_MIN,
                max: SLIDER_MAX,
                default: SLIDER_DEFAULT,
                step: SLIDER_STEP,
                value: self.get(feature),
            })
            .collect()
    }
}

/// What the prediction section shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionDisplay {
    Label { label: String },
    Error { message: String },
}

/// Everything one render pass puts on the page
#[derive(Debug, Clone, Serialize)]
pub struct FormOutput {
    pub title: &'static str,
    pub description: &'static str,
    pub sliders: Vec<SliderSpec>,
    pub header: &'static str,
    pub lead: &'static str,
    pub prediction: PredictionDisplay,
}

/// Scale, classify and decode the current slider values
pub fn predict_on_current_inputs(
    inputs: &FormInputs,
    context: &ArtifactContext,
) -> std::result::Result<String, PredictionError> {
    let features = inputs.to_feature_vector();
    context.predict_label(features.view())
}

/// One full render pass; prediction failures are shown inline
pub fn render(inputs: &FormInputs, context: &ArtifactContext) -> FormOutput {
    let prediction = match predict_on_current_inputs(inputs, context) {
        Ok(label) => PredictionDisplay::Label { label },
        Err(e) => {
            warn!(error = %e, inputs = ?inputs.values(), "Prediction failed during render");
            PredictionDisplay::Error { message: e.to_string() }
        }
    };

    FormOutput {
        title: TITLE,
        description: DESCRIPTION,
        sliders: inputs.sliders(),
        header: PREDICTION_HEADER,
        lead: PREDICTION_LEAD,
        prediction,
    }
}
