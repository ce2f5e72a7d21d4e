//! NoGo polygon query handler.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nogo_common::{NogoError, NogoRequest};
use serde::Serialize;
use tracing::{error, info};

use crate::metrics;
use crate::state::AppState;

/// JSON body for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

impl ErrorBody {
    fn from_error(err: &NogoError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

/// POST /nogo - Compute NoGo polygons for a bounding box, draught and window.
pub async fn nogo_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<NogoRequest>,
) -> Response {
    let started = Instant::now();
    let elapsed_ms = || started.elapsed().as_secs_f64() * 1000.0;

    if let Err(e) = request.validate() {
        info!(error = %e, "Rejected NoGo request");
        metrics::record_failure(e.kind(), elapsed_ms());
        return error_response(&e);
    }

    match state.pipeline.poll(&request).await {
        Ok(response) => {
            metrics::record_request(response.error_code, response.polygons.len(), elapsed_ms());
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let err: NogoError = e.into();
            error!(error = %err, "NoGo request failed");
            metrics::record_failure(err.kind(), elapsed_ms());
            error_response(&err)
        }
    }
}

fn error_response(err: &NogoError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody::from_error(err))).into_response()
}
