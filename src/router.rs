use crate::models::{AnalyzeSmileRequest, ErrorResponse};
use crate::request_id::{RequestId, inject_request_id};
use crate::service::{AnalyzeError, SmileService};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SmileService>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/analyze-smile", post(analyze_smile))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(inject_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn health() -> &'static str {
    "Smile API server is running!"
}

#[axum_macros::debug_handler]
pub async fn analyze_smile(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<AnalyzeSmileRequest>, JsonRejection>,
) -> Response {
    let image_data = match payload {
        Ok(Json(body)) => body.image_data.filter(|data| !data.is_empty()),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!("Request body over {} bytes", MAX_BODY_BYTES);
            let body = ErrorResponse::new("Request body is too large.").with_details(rejection.body_text());
            return (StatusCode::PAYLOAD_TOO_LARGE, Json(body)).into_response();
        }
        Err(rejection) => {
            debug!("Unreadable request body: {}", rejection);
            None
        }
    };

    let Some(image_data) = image_data else {
        info!("Request without imageData");
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new("imageData is required."))).into_response();
    };

    match state.service.analyze_smile(&image_data, &request_id).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: AnalyzeError) -> Response {
    match &err {
        AnalyzeError::InvalidInput(reason) => {
            warn!("Rejected imageData: {}", reason);
            let body = ErrorResponse::new("imageData must be a base64 data URI.").with_details(reason.to_string());
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
        AnalyzeError::IncompleteResponse { image_response, analysis_response } => {
            error!(
                image_finish_reason = ?image_response.finish_reason(),
                image_block_reason = ?image_response.block_reason(),
                analysis_finish_reason = ?analysis_response.finish_reason(),
                analysis_block_reason = ?analysis_response.block_reason(),
                "Incomplete AI response: image_response={} analysis_response={}",
                serde_json::to_string(image_response).unwrap_or_default(),
                serde_json::to_string(analysis_response).unwrap_or_default(),
            );
        }
        AnalyzeError::Provider(e) => {
            error!("Error in /api/analyze-smile: {}", e);
        }
    }

    let body = ErrorResponse::new("Failed to analyze smile.").with_details(err.to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
