//! Decision tree inference

use crate::error::{IrisError, Result};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node with prediction value
    Leaf {
        value: f64,
    },
    /// Internal node with split; samples with `x[feature_idx] <= threshold` go left
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Trained decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TreeRepr", into = "TreeRepr")]
pub struct DecisionTree {
    /// Tree root
    root: TreeNode,
    /// Number of features
    n_features: usize,
}

#[derive(Serialize, Deserialize)]
struct TreeRepr {
    root: TreeNode,
    n_features: usize,
}

impl TryFrom<TreeRepr> for DecisionTree {
    type Error = IrisError;

    fn try_from(repr: TreeRepr) -> Result<Self> {
        Self::from_root(repr.root, repr.n_features)
    }
}

impl From<DecisionTree> for TreeRepr {
    fn from(tree: DecisionTree) -> Self {
        Self {
            root: tree.root,
            n_features: tree.n_features,
        }
    }
}

impl DecisionTree {
    /// Create a tree from an existing root node
    pub fn from_root(root: TreeNode, n_features: usize) -> Result<Self> {
        let tree = Self { root, n_features };
        tree.validate()?;
        Ok(tree)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Check that every split refers to an existing feature
    fn validate(&self) -> Result<()> {
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let TreeNode::Split { feature_idx, threshold, left, right } = node {
                if *feature_idx >= self.n_features {
                    return Err(IrisError::InvalidArtifact(format!(
                        "split on feature {} but tree has {} features",
                        feature_idx, self.n_features
                    )));
                }
                if threshold.is_nan() {
                    return Err(IrisError::InvalidArtifact(format!(
                        "split on feature {} has NaN threshold",
                        feature_idx
                    )));
                }
                stack.push(left);
                stack.push(right);
            }
        }
        Ok(())
    }

    /// Values stored in the leaves, in traversal order
    pub fn leaf_values(&self) -> Vec<f64> {
        let mut values = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf { value } => values.push(*value),
                TreeNode::Split { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        values
    }

    /// Predict a single sample
    pub fn predict_row(&self, sample: ArrayView1<f64>) -> Result<f64> {
        if sample.len() != self.n_features {
            return Err(IrisError::ShapeError {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", sample.len()),
            });
        }

        Ok(Self::predict_sample(&self.root, &sample))
    }

    fn predict_sample(node: &TreeNode, sample: &ArrayView1<f64>) -> f64 {
        match node {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split { feature_idx, threshold, left, right } => {
                if sample[*feature_idx] <= *threshold {
                    Self::predict_sample(left, sample)
                } else {
                    Self::predict_sample(right, sample)
                }
            }
        }
    }
}
