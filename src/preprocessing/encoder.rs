//! Label encoding between class indices and class names

use crate::error::{IrisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label encoder: class `i` is `classes[i]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EncoderRepr", into = "EncoderRepr")]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct EncoderRepr {
    classes: Vec<String>,
}

impl TryFrom<EncoderRepr> for LabelEncoder {
    type Error = IrisError;

    fn try_from(repr: EncoderRepr) -> Result<Self> {
        Self::new(repr.classes)
    }
}

impl From<LabelEncoder> for EncoderRepr {
    fn from(encoder: LabelEncoder) -> Self {
        Self { classes: encoder.classes }
    }
}

impl LabelEncoder {
    /// Create an encoder from an ordered list of class names
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(IrisError::InvalidArtifact(
                "label encoder has no classes".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(classes.len());
        for (i, label) in classes.iter().enumerate() {
            if label.is_empty() {
                return Err(IrisError::InvalidArtifact(format!(
                    "label encoder class {} is empty",
                    i
                )));
            }
            if index.insert(label.clone(), i).is_some() {
                return Err(IrisError::InvalidArtifact(format!(
                    "label encoder class '{}' appears more than once",
                    label
                )));
            }
        }

        Ok(Self { classes, index })
    }

    /// Load an encoder from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let encoder: Self = serde_json::from_str(&json)?;
        Ok(encoder)
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Map a class name to its index
    pub fn transform(&self, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| IrisError::UnknownLabel(label.to_string()))
    }

    /// Map a class index back to its name
    pub fn inverse_transform(&self, index: usize) -> Result<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(IrisError::UnknownClass(index))
    }
}
