use serde::Deserialize;

use super::artifact::LoadError;
use super::{Classifier, ClassifierError, FeatureRow, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Rows with `x[feature] <= threshold` go to `left`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class sample weights reaching this leaf.
    Leaf { value: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForestParams {
    pub classes: Vec<i64>,
    pub trees: Vec<Tree>,
}

impl Tree {
    fn validate(&self, n_classes: usize) -> Result<(), LoadError> {
        if self.nodes.is_empty() {
            return Err(LoadError::Invalid("tree has no nodes".into()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(LoadError::Invalid(format!(
                            "node {index} splits on feature {feature}, only {FEATURE_COUNT} exist"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(LoadError::Invalid(format!(
                            "node {index} has a non-finite threshold"
                        )));
                    }
                    // Children after their parent keeps every walk finite.
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(LoadError::Invalid(format!(
                                "node {index} has invalid child {child}"
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(LoadError::Invalid(format!(
                            "leaf {index} has {} class weights, expected {n_classes}",
                            value.len()
                        )));
                    }
                    let unusable = value.iter().any(|w| !w.is_finite() || *w < 0.0)
                        || value.iter().sum::<f64>() <= 0.0;
                    if unusable {
                        return Err(LoadError::Invalid(format!("leaf {index} has unusable weights")));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf(&self, row: &FeatureRow) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row.values()[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

/// Averages the normalised leaf distributions of its trees.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    classes: Vec<i64>,
    trees: Vec<Tree>,
}

impl RandomForest {
    pub fn from_params(params: ForestParams) -> Result<Self, LoadError> {
        if params.classes.len() < 2 {
            return Err(LoadError::Invalid("a forest needs at least 2 classes".into()));
        }
        if params.trees.is_empty() {
            return Err(LoadError::Invalid("a forest needs at least one tree".into()));
        }
        for tree in &params.trees {
            tree.validate(params.classes.len())?;
        }
        Ok(Self {
            classes: params.classes,
            trees: params.trees,
        })
    }

    fn distribution(&self, row: &FeatureRow) -> Vec<f64> {
        let mut mean = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(row);
            let total: f64 = leaf.iter().sum();
            for (acc, w) in mean.iter_mut().zip(leaf) {
                *acc += w / total;
            }
        }
        let n = self.trees.len() as f64;
        mean.iter_mut().for_each(|p| *p /= n);
        mean
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &str {
        "random_forest"
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<i64>, ClassifierError> {
        rows.iter()
            .map(|row| {
                let distribution = self.distribution(row);
                let mut best = 0;
                for (i, p) in distribution.iter().enumerate() {
                    if *p > distribution[best] {
                        best = i;
                    }
                }
                self.classes
                    .get(best)
                    .copied()
                    .ok_or_else(|| ClassifierError::Inference(format!("no class at index {best}")))
            })
            .collect()
    }

    fn predict_probability(&self, rows: &[FeatureRow]) -> Result<Vec<Vec<f64>>, ClassifierError> {
        Ok(rows.iter().map(|row| self.distribution(row)).collect())
    }
}
