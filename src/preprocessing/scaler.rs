//! Fitted feature scaler

use crate::error::{IrisError, Result};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Kind of scaling the parameters were fitted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalerType {
    /// Standard scaling (z-score normalization): (x - mean) / std
    Standard,
    /// Min-Max scaling: (x - min) / (max - min)
    MinMax,
    /// Robust scaling using median and IQR
    Robust,
    /// Max absolute scaling: x / max(|x|)
    MaxAbs,
}

/// Parameters for one fitted feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    /// mean, min, or median
    pub center: f64,
    /// std, range, or IQR
    pub scale: f64,
}

/// Feature scaler with per-feature parameters, indexed by feature position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ScalerRepr", into = "ScalerRepr")]
pub struct Scaler {
    scaler_type: ScalerType,
    params: Vec<ScalerParams>,
}

#[derive(Serialize, Deserialize)]
struct ScalerRepr {
    scaler_type: ScalerType,
    params: Vec<ScalerParams>,
}

impl TryFrom<ScalerRepr> for Scaler {
    type Error = IrisError;

    fn try_from(repr: ScalerRepr) -> Result<Self> {
        Self::from_params(repr.scaler_type, repr.params)
    }
}

impl From<Scaler> for ScalerRepr {
    fn from(scaler: Scaler) -> Self {
        Self {
            scaler_type: scaler.scaler_type,
            params: scaler.params,
        }
    }
}

impl Scaler {
    /// Build a scaler from already fitted parameters
    pub fn from_params(scaler_type: ScalerType, params: Vec<ScalerParams>) -> Result<Self> {
        if params.is_empty() {
            return Err(IrisError::InvalidArtifact(
                "scaler has no fitted features".to_string(),
            ));
        }
        for (idx, p) in params.iter().enumerate() {
            if !p.center.is_finite() || !p.scale.is_finite() || p.scale == 0.0 {
                return Err(IrisError::InvalidArtifact(format!(
                    "scaler feature {} has unusable parameters (center={}, scale={})",
                    idx, p.center, p.scale
                )));
            }
        }
        Ok(Self { scaler_type, params })
    }

    /// Load a scaler from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let scaler: Self = serde_json::from_str(&json)?;
        Ok(scaler)
    }

    pub fn scaler_type(&self) -> ScalerType {
        self.scaler_type
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.params.len()
    }

    /// Scale a single sample
    pub fn transform_row(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        if x.len() != self.params.len() {
            return Err(IrisError::ShapeError {
                expected: format!("{} features", self.params.len()),
                actual: format!("{} features", x.len()),
            });
        }
        Ok(x.iter()
            .zip(self.params.iter())
            .map(|(&v, p)| (v - p.center) / p.scale)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn standard() -> Scaler {
        Scaler::from_params(
            ScalerType::Standard,
            vec![
                ScalerParams { center: 2.0, scale: 2.0 },
                ScalerParams { center: -1.0, scale: 0.5 },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_transform_row() {
        let scaler = standard();
        let out = scaler.transform_row(array![4.0, 0.0].view()).unwrap();
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_width_mismatch() {
        let scaler = standard();
        let err = scaler.transform_row(array![1.0, 2.0, 3.0].view()).unwrap_err();
        assert!(matches!(err, IrisError::ShapeError { .. }));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let err = Scaler::from_params(
            ScalerType::MinMax,
            vec![ScalerParams { center: 0.0, scale: 0.0 }],
        )
        .unwrap_err();
        assert!(matches!(err, IrisError::InvalidArtifact(_)));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Scaler = serde_json::from_str(
            r#"{"scaler_type":"Standard","params":[{"center":1.0,"scale":2.0}]}"#,
        )
        .unwrap();
        assert_eq!(ok.n_features(), 1);

        let zero_scale = serde_json::from_str::<Scaler>(
            r#"{"scaler_type":"Standard","params":[{"center":1.0,"scale":0.0}]}"#,
        );
        assert!(zero_scale.is_err());

        let empty = serde_json::from_str::<Scaler>(r#"{"scaler_type":"Robust","params":[]}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn test_scaler_type_serialize() {
        let json = serde_json::to_string(&ScalerType::Standard).unwrap();
        assert_eq!(json, "\"Standard\"");
    }
}
