//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::planner::{Itinerary, RouteError};
use crate::source::SourceError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/route", get(route_query))
        .route("/api/route", post(route_api))
        .route("/api/stations", get(stations))
        .route("/api/lines", get(lines))
        .route("/admin/reload", post(reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the route form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        station_count: state.engine.stats().await.stations,
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Graph statistics and load time.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let loaded = state.engine.snapshot().await;
    let config = state.engine.config();

    Json(StatusResponse {
        generation: loaded.generation,
        loaded_at: loaded.loaded_at,
        stats: loaded.graph.stats(),
        transfer_penalty_mins: config.transfer_penalty_mins,
        line_aware: is_line_aware(config.strategy),
    })
}

/// All stations with display names.
async fn stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse {
        stations: state.engine.stations().await,
    })
}

/// All lines with the number of stations they serve.
async fn lines(State(state): State<AppState>) -> Json<LinesResponse> {
    Json(LinesResponse {
        lines: state.engine.lines().await,
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a route from query parameters.
async fn route_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RouteQuery>,
) -> Result<Response, AppError> {
    respond_with_route(&state, &headers, req.from, req.to).await
}

/// Plan a route from a JSON body.
async fn route_api(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: RouteRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid route request");
            let err = AppError::BadRequest {
                message: format!("Invalid JSON: {e}"),
            };
            if accepts_html(&headers) {
                return Ok(err.into_html_response());
            }
            return Err(err);
        }
    };

    respond_with_route(&state, &headers, req.start_station, req.end_station).await
}

/// Run a route query and render it as HTML or JSON based on the Accept header.
async fn respond_with_route(
    state: &AppState,
    headers: &HeaderMap,
    from: Option<String>,
    to: Option<String>,
) -> Result<Response, AppError> {
    let result = plan(state, from, to).await;

    if !accepts_html(headers) {
        let itinerary = result?;
        return Ok(Json(RouteResponse::from_itinerary(&itinerary)).into_response());
    }

    match result {
        Ok(itinerary) => {
            let template = RouteResultsTemplate {
                route: RouteView::from_itinerary(&itinerary),
            };
            let html = template.render().map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
            })?;
            Ok(Html(html).into_response())
        }
        Err(e) => Ok(e.into_html_response()),
    }
}

async fn plan(
    state: &AppState,
    from: Option<String>,
    to: Option<String>,
) -> Result<Arc<Itinerary>, AppError> {
    let (Some(from), Some(to)) = (required(from), required(to)) else {
        return Err(AppError::BadRequest {
            message: "start and end station are required".to_string(),
        });
    };

    Ok(state.engine.find_route(&from, &to).await?)
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Rebuild the graph from the configured source.
async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let loaded = state.engine.reload(state.source.as_ref()).await?;
    info!(generation = loaded.generation, "Reload requested over HTTP");
    Ok(Json(ReloadResponse::from_loaded(&loaded)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    UnresolvedStation { from: String, to: String },
    NoPath { from: String, to: String },
    Upstream { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } | AppError::UnresolvedStation { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NoPath { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest { message }
            | AppError::Upstream { message }
            | AppError::Internal { message } => message.clone(),
            AppError::UnresolvedStation { .. } => "invalid station name".to_string(),
            AppError::NoPath { .. } => "no path found".to_string(),
        }
    }

    fn stations(&self) -> (Option<String>, Option<String>) {
        match self {
            AppError::UnresolvedStation { from, to } | AppError::NoPath { from, to } => {
                (Some(from.clone()), Some(to.clone()))
            }
            _ => (None, None),
        }
    }

    fn log(&self) {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }
    }

    /// Render as an HTML error fragment.
    fn into_html_response(self) -> Response {
        self.log();

        let status = self.status();
        let details = match self.stations() {
            (Some(from), Some(to)) => Some(format!("{} → {}", from, to)),
            _ => None,
        };
        let template = ErrorTemplate {
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.message(),
            details,
        };

        let html = template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
        (status, Html(html)).into_response()
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::UnresolvedStation { from, to } => AppError::UnresolvedStation { from, to },
            RouteError::NoPathFound { from, to } => AppError::NoPath { from, to },
        }
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::Upstream {
            message: format!("reload failed: {}", e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();

        let (start_station, end_station) = self.stations();
        let body = Json(ErrorResponse {
            success: false,
            message: self.message(),
            start_station,
            end_station,
        });
        (self.status(), body).into_response()
    }
}
