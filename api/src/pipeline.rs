//! Waste-risk decision pipeline: expiry override, classifier call, confidence and
//! shelf placement.

use std::slice;

use crate::classifier::{Classifier, ClassifierError, FeatureRow};
use crate::error::PredictError;
use crate::model::{Category, PredictionRequest, PredictionResult, Risk, ShelfAction};

pub const EXPIRED_SUGGESTION: &str = "Product expired — remove from shelf";
pub const EXPIRED_CONFIDENCE: u8 = 99;

const REFRIGERATED_CATEGORIES: [&str; 4] = ["1", "dairy", "3", "meat"];
const REFRIGERATION_BELOW_C: f64 = 10.0;
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

pub fn assess(
    classifier: &dyn Classifier,
    request: &PredictionRequest,
) -> Result<PredictionResult, PredictError> {
    // Expired stock never reaches the model.
    if request.is_expired() {
        return Ok(PredictionResult {
            risk: Risk::High,
            suggestion: EXPIRED_SUGGESTION.to_string(),
            confidence: EXPIRED_CONFIDENCE,
            shelf_action: placement(Risk::High, &request.category, request.temperature_c),
        });
    }

    let code = request.category.code().ok_or_else(|| {
        PredictError::invalid(format!(
            "category {:?} has no numeric code for the classifier",
            request.category.normalized()
        ))
    })?;
    let features = FeatureRow::new(code, request);

    let labels = classifier.predict(slice::from_ref(&features))?;
    let label = *labels
        .first()
        .ok_or_else(|| PredictError::invalid("classifier returned no label"))?;
    let risk = Risk::from_label(label);

    Ok(PredictionResult {
        risk,
        suggestion: risk.suggestion().to_string(),
        confidence: confidence(classifier, &features, risk)?,
        shelf_action: placement(risk, &request.category, request.temperature_c),
    })
}

/// Falls back to a fixed value only when the model has no probability support.
/// A malformed distribution is an error.
pub fn confidence(
    classifier: &dyn Classifier,
    features: &FeatureRow,
    risk: Risk,
) -> Result<u8, PredictError> {
    match classifier.predict_probability(slice::from_ref(features)) {
        Ok(distributions) => {
            let distribution = distributions
                .first()
                .ok_or_else(|| PredictError::invalid("classifier returned no probabilities"))?;
            confidence_from_distribution(distribution)
        }
        Err(ClassifierError::ProbabilityUnsupported) => Ok(risk.fallback_confidence()),
        Err(e) => Err(e.into()),
    }
}

pub fn confidence_from_distribution(distribution: &[f64]) -> Result<u8, PredictError> {
    let well_formed = !distribution.is_empty()
        && distribution
            .iter()
            .all(|p| p.is_finite() && (0.0..=1.0).contains(p))
        && (distribution.iter().sum::<f64>() - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE;
    if !well_formed {
        return Err(PredictError::invalid(format!(
            "classifier returned an unexpected probability distribution {distribution:?}"
        )));
    }
    let max = distribution.iter().copied().fold(0.0, f64::max);
    Ok((max * 100.0).round_ties_even().clamp(0.0, 100.0) as u8)
}

pub fn placement(risk: Risk, category: &Category, temperature_c: f64) -> ShelfAction {
    if risk == Risk::High {
        return ShelfAction::Front;
    }
    let key = category.normalized();
    if REFRIGERATED_CATEGORIES.contains(&key.as_str()) || temperature_c < REFRIGERATION_BELOW_C {
        ShelfAction::RefrigeratedShelf
    } else {
        ShelfAction::Back
    }
}
