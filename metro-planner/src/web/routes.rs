//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use crate::domain::{Itinerary, TimeOfDay};
use crate::planner::{PlanError, TripRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Shown for any request rejected before a route search.
const INVALID_INPUT_MESSAGE: &str = "Invalid input or time out of operating hours.";

/// Shown when the destination cannot be reached.
const NO_PATH_MESSAGE: &str = "No path found between selected stations.";

/// Static assets shipped with the crate, independent of the working directory.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/trip/plan", post(plan_trip))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Booking page with the trip form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let engine = &state.engine;
    let template = IndexTemplate {
        stations: engine.network().stations().map(|s| s.to_string()).collect(),
        departure: TimePicker::new(engine.config().opens),
        opens: engine.config().opens.to_string(),
        closes: engine.config().closes.to_string(),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// List the stations of the network.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    Json(StationListResponse::from_engine(&state.engine))
}

/// Check if request accepts the given media type.
fn accepts(headers: &HeaderMap, media_type: &str) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains(media_type))
}

/// Plan a trip between two stations.
///
/// Responds with an HTML fragment, the plain-text timetable or JSON
/// depending on the Accept header. Errors follow the same choice between
/// an HTML fragment and JSON.
async fn plan_trip(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let result = plan(&state, &body).and_then(|itinerary| render_trip(&headers, &itinerary));

    match result {
        Ok(response) => response,
        Err(err) if accepts(&headers, "text/html") => err.into_fragment(),
        Err(err) => err.into_response(),
    }
}

/// Parse the request body and run the planner.
fn plan(state: &AppState, body: &[u8]) -> Result<Itinerary, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanTripRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(body), "unparseable trip request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
            detail: None,
        }
    })?;

    let engine = &state.engine;
    let start = req.start.resolve(engine).map_err(PlanError::from)?;
    let end = req.end.resolve(engine).map_err(PlanError::from)?;
    let departure = TimeOfDay::parse_12h(&req.departure).map_err(PlanError::from)?;

    Ok(engine.plan(&TripRequest::new(start, end, departure))?)
}

/// Render a planned trip in the format the client asked for.
fn render_trip(headers: &HeaderMap, itinerary: &Itinerary) -> Result<Response, AppError> {
    if accepts(headers, "text/html") {
        let template = TripResultsTemplate {
            trip: TripView::from_itinerary(itinerary),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
        Ok(Html(html).into_response())
    } else if accepts(headers, "text/plain") {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            itinerary.render(),
        )
            .into_response())
    } else {
        Ok(Json(PlanTripResponse::from_itinerary(itinerary)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
        detail: Option<String>,
    },
    NotFound {
        message: String,
        detail: Option<String>,
    },
    Internal {
        message: String,
    },
}

impl AppError {
    fn parts(&self) -> (StatusCode, &str, Option<&str>) {
        match self {
            AppError::BadRequest { message, detail } => {
                (StatusCode::BAD_REQUEST, message.as_str(), detail.as_deref())
            }
            AppError::NotFound { message, detail } => {
                (StatusCode::NOT_FOUND, message.as_str(), detail.as_deref())
            }
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.as_str(), None)
            }
        }
    }

    /// Render as an HTML fragment for the booking page.
    fn into_fragment(self) -> Response {
        let (status, message, detail) = self.parts();
        warn!(%status, error = message, detail = detail.unwrap_or_default(), "request failed");

        let template = ErrorTemplate {
            message: message.to_string(),
            details: detail.map(str::to_string),
        };
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, message.to_string()).into_response(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Parse(_) | PlanError::Validation(_) => AppError::BadRequest {
                message: INVALID_INPUT_MESSAGE.to_string(),
                detail: Some(e.to_string()),
            },
            PlanError::NoPath { .. } => AppError::NotFound {
                message: NO_PATH_MESSAGE.to_string(),
                detail: Some(e.to_string()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = self.parts();
        warn!(%status, error = message, detail = detail.unwrap_or_default(), "request failed");

        let body = Json(ErrorResponse {
            error: message.to_string(),
            detail: detail.map(str::to_string),
        });
        (status, body).into_response()
    }
}
