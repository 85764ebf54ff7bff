use serde::Deserialize;

use super::artifact::LoadError;
use super::{Classifier, ClassifierError, FeatureRow, FEATURE_COUNT};

/// Persisted parameters shared by the linear model families.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearParams {
    pub classes: Vec<i64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct LinearModel {
    classes: [i64; 2],
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    fn from_params(params: LinearParams) -> Result<Self, LoadError> {
        let classes: [i64; 2] = params.classes.try_into().map_err(|c: Vec<i64>| {
            LoadError::Invalid(format!("linear models need exactly 2 classes, got {}", c.len()))
        })?;
        let coefficients: [f64; FEATURE_COUNT] =
            params.coefficients.try_into().map_err(|c: Vec<f64>| {
                LoadError::Invalid(format!(
                    "expected {FEATURE_COUNT} coefficients, got {}",
                    c.len()
                ))
            })?;
        if !params.intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
            return Err(LoadError::Invalid("linear model parameters must be finite".into()));
        }
        Ok(Self {
            classes,
            coefficients,
            intercept: params.intercept,
        })
    }

    fn decision(&self, row: &FeatureRow) -> f64 {
        self.coefficients
            .iter()
            .zip(row.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    fn label(&self, decision: f64) -> i64 {
        if decision > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        }
    }
}

/// Logistic regression; the positive class is `classes[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression(LinearModel);

impl LogisticRegression {
    pub fn from_params(params: LinearParams) -> Result<Self, LoadError> {
        LinearModel::from_params(params).map(Self)
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &str {
        "logistic_regression"
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<i64>, ClassifierError> {
        Ok(rows.iter().map(|row| self.0.label(self.0.decision(row))).collect())
    }

    fn predict_probability(&self, rows: &[FeatureRow]) -> Result<Vec<Vec<f64>>, ClassifierError> {
        Ok(rows
            .iter()
            .map(|row| {
                let positive = 1.0 / (1.0 + (-self.0.decision(row)).exp());
                vec![1.0 - positive, positive]
            })
            .collect())
    }
}

/// Linear SVM. Predicts by the sign of the decision function and has no
/// probability estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSvm(LinearModel);

impl LinearSvm {
    pub fn from_params(params: LinearParams) -> Result<Self, LoadError> {
        LinearModel::from_params(params).map(Self)
    }
}

impl Classifier for LinearSvm {
    fn kind(&self) -> &str {
        "linear_svm"
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<i64>, ClassifierError> {
        Ok(rows.iter().map(|row| self.0.label(self.0.decision(row))).collect())
    }
}
