//! Random Forest classifier inference

use crate::error::{IrisError, Result};
use super::decision_tree::DecisionTree;
use ndarray::ArrayView1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random Forest classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ForestRepr", into = "ForestRepr")]
pub struct RandomForest {
    /// Individual trees
    trees: Vec<DecisionTree>,
    /// Number of features
    n_features: usize,
    /// Class values the leaves may hold, in vote tie-break order
    classes: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct ForestRepr {
    trees: Vec<DecisionTree>,
    n_features: usize,
    classes: Vec<f64>,
}

impl TryFrom<ForestRepr> for RandomForest {
    type Error = IrisError;

    fn try_from(repr: ForestRepr) -> Result<Self> {
        Self::from_trees(repr.trees, repr.n_features, repr.classes)
    }
}

impl From<RandomForest> for ForestRepr {
    fn from(forest: RandomForest) -> Self {
        Self {
            trees: forest.trees,
            n_features: forest.n_features,
            classes: forest.classes,
        }
    }
}

impl RandomForest {
    /// Assemble a forest from trained trees
    pub fn from_trees(trees: Vec<DecisionTree>, n_features: usize, classes: Vec<f64>) -> Result<Self> {
        let forest = Self { trees, n_features, classes };
        forest.validate()?;
        Ok(forest)
    }

    /// Load a forest from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let forest: Self = serde_json::from_str(&json)?;
        Ok(forest)
    }

    fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(IrisError::ModelNotFitted);
        }
        if self.classes.is_empty() {
            return Err(IrisError::InvalidArtifact("forest has no classes".to_string()));
        }
        for (idx, &class) in self.classes.iter().enumerate() {
            if class < 0.0 || class.fract() != 0.0 {
                return Err(IrisError::InvalidArtifact(format!(
                    "class value {} is not a class index",
                    class
                )));
            }
            if self.classes[..idx].contains(&class) {
                return Err(IrisError::InvalidArtifact(format!(
                    "class value {} is listed twice",
                    class
                )));
            }
        }

        for (idx, tree) in self.trees.iter().enumerate() {
            if tree.n_features() != self.n_features {
                return Err(IrisError::InvalidArtifact(format!(
                    "tree {} expects {} features, forest expects {}",
                    idx,
                    tree.n_features(),
                    self.n_features
                )));
            }
            if let Some(value) = tree.leaf_values().into_iter().find(|v| !self.classes.contains(v)) {
                return Err(IrisError::InvalidArtifact(format!(
                    "tree {} has leaf value {} outside the class list",
                    idx, value
                )));
            }
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    /// Get number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Predict one sample by majority vote
    pub fn predict_row(&self, sample: ArrayView1<f64>) -> Result<f64> {
        let votes: Vec<f64> = self.trees
            .par_iter()
            .map(|tree| tree.predict_row(sample))
            .collect::<Result<Vec<f64>>>()?;

        let mut counts = vec![0usize; self.classes.len()];
        for vote in votes {
            let class_idx = self.classes
                .iter()
                .position(|&c| c == vote)
                .ok_or_else(|| IrisError::InvalidArtifact(format!("leaf value {} is not a class", vote)))?;
            counts[class_idx] += 1;
        }

        // First class wins a tie
        let best = counts
            .iter()
            .enumerate()
            .fold(0, |best, (i, &count)| if count > counts[best] { i } else { best });

        Ok(self.classes[best])
    }
}
