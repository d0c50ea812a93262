use crate::core::{AggregationPipeline, ConfigProvider};
use crate::utils::error::AggregateError;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Body of every 500 response from `/api/data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: serde_json::Value,
    pub step: String,
}

impl From<&AggregateError> for ErrorBody {
    fn from(e: &AggregateError) -> Self {
        Self {
            error: e.to_string(),
            details: e.details(),
            step: e.step(),
        }
    }
}

/// `/api/data` plus static serving of the front-end bundle.
pub fn router<C>(pipeline: Arc<AggregationPipeline<C>>, static_dir: &str) -> Router
where
    C: ConfigProvider + 'static,
{
    Router::new()
        .route("/api/data", get(get_data::<C>))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

async fn get_data<C>(
    State(pipeline): State<Arc<AggregationPipeline<C>>>,
) -> axum::response::Response
where
    C: ConfigProvider + 'static,
{
    match pipeline.run().await {
        Ok(data) => {
            tracing::info!("✓ All data collected successfully, sending to client");
            Json(data).into_response()
        }
        Err(e) => {
            tracing::error!("❌ Aggregation failed at {}: {}", e.step(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::from(&e))).into_response()
        }
    }
}
