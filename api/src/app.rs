use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::classifier::Classifier;
use crate::handler::{home, predict};

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
