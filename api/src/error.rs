use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use thiserror::Error;

use crate::classifier::ClassifierError;

/// Failures of a single `/predict` request. None of them are fatal to the process.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl PredictError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Every failure is reported to the caller as a 400 with an `error` message.
    pub fn to_response(&self) -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_wire_field() {
        let err = PredictError::MissingField("temperature_C");
        assert_eq!(err.to_string(), "Missing field: temperature_C");
    }

    #[test]
    fn every_error_is_a_bad_request() {
        let errors = [
            PredictError::MissingField("category"),
            PredictError::invalid("days_on_shelf must be an integer"),
            PredictError::from(ClassifierError::Inference("boom".into())),
        ];
        for err in errors {
            let (status, Json(body)) = err.to_response();
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], err.to_string());
        }
    }
}
