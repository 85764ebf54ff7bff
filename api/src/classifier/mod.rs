//! Binary waste-risk classifier capability and the adapters that implement it.
//!
//! The request pipeline only sees [`Classifier`]; concrete models are built from a
//! persisted JSON artifact by [`artifact::load_classifier`].

pub mod artifact;
pub mod forest;
pub mod linear;

use thiserror::Error;

use crate::model::PredictionRequest;

/// Number of model inputs, in the order of [`FeatureRow`].
pub const FEATURE_COUNT: usize = 5;

/// `[category, sales_per_day, shelf_life_days, days_on_shelf, temperature_c]`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FeatureRow(pub [f64; FEATURE_COUNT]);

impl FeatureRow {
    pub fn new(category_code: i64, request: &PredictionRequest) -> Self {
        FeatureRow([
            category_code as f64,
            request.sales_per_day,
            f64::from(request.shelf_life_days),
            f64::from(request.days_on_shelf),
            request.temperature_c,
        ])
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The model type has no probability estimates. Not a failure of the request.
    #[error("classifier does not support probability estimates")]
    ProbabilityUnsupported,
    #[error("classifier inference failed: {0}")]
    Inference(String),
}

/// Read-only classifier shared by every request handler.
pub trait Classifier: Send + Sync {
    /// Short model family name, for logs.
    fn kind(&self) -> &str;

    /// One label per row; `1` is high risk.
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<i64>, ClassifierError>;

    /// One per-class probability distribution per row.
    fn predict_probability(&self, _rows: &[FeatureRow]) -> Result<Vec<Vec<f64>>, ClassifierError> {
        Err(ClassifierError::ProbabilityUnsupported)
    }
}
