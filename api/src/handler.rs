use axum::body::Bytes;
use axum::http::StatusCode;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value;

use crate::app::AppState;
use crate::error::PredictError;
use crate::pipeline;
use crate::schema;

pub async fn home() -> &'static str {
    "EcoShelf AI backend is running ✅"
}

pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    log::debug!("prediction request: {}", String::from_utf8_lossy(&body));

    let outcome = schema::parse_body(&body)
        .and_then(|request| pipeline::assess(state.classifier.as_ref(), &request));

    match outcome {
        Ok(result) => Ok((StatusCode::OK, Json(result))),
        Err(e) => {
            match &e {
                PredictError::Classifier(_) => log::error!("prediction failed: {e}"),
                _ => log::warn!("rejected prediction request: {e}"),
            }
            Err(e.to_response())
        }
    }
}
