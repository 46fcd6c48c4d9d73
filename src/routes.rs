use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::deeplink;
use crate::errors::AppError;
use crate::models::requests::CreateSwoshRequest;
use crate::models::response::{ApiResponse, CreateSwoshResponse};
use crate::models::Swosh;
use crate::pages;
use crate::validation;
use crate::AppState;

pub const ID_LENGTH: usize = 10;
const MAX_ID_ATTEMPTS: usize = 3;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/create", post(create_swosh))
        .route("/{id}", get(redirect_swosh))
        .route("/{id}/preview", get(preview_swosh))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn generate_id() -> String {
    nanoid::nanoid!(ID_LENGTH)
}

/// Ids only ever contain the nanoid alphabet; anything else can skip the store.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn home() -> Response {
    found("/".to_owned())
}

async fn index() -> Html<&'static str> {
    Html(pages::INDEX_HTML)
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let backend = state.repo.backend_name();
    match state.repo.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "store": "connected",
                "backend": backend
            })),
        ),
        Err(err) => {
            warn!(error = %err, backend, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "store": "disconnected",
                    "backend": backend
                })),
            )
        }
    }
}

async fn create_swosh(
    State(state): State<AppState>,
    payload: Result<Json<CreateSwoshRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CreateSwoshResponse>>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected create body");
        AppError::validation("Invalid JSON body")
    })?;

    let now = Utc::now();
    let new = validation::validate(&request, state.phone_region, now)?;

    for attempt in 1..=MAX_ID_ATTEMPTS {
        let swosh = Swosh::new(generate_id(), &new, now);
        match state.repo.create(&swosh).await {
            Ok(()) => {
                info!(id = %swosh.id, amount = swosh.amount, "swosh created");
                return Ok(Json(ApiResponse::success(CreateSwoshResponse { id: swosh.id })));
            }
            Err(AppError::Conflict) => {
                warn!(id = %swosh.id, attempt, "generated id already taken");
            }
            Err(err) => return Err(err),
        }
    }
    Err(AppError::Conflict)
}

async fn lookup(state: &AppState, id: &str) -> Result<Option<Swosh>, AppError> {
    if !is_valid_id(id) {
        debug!(id, "malformed id");
        return Ok(None);
    }
    state.repo.find(id).await
}

async fn redirect_swosh(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match lookup(&state, &id).await? {
        Some(swosh) => Ok(found(deeplink::payment_uri(&swosh))),
        None => {
            debug!(id = %id, "unknown swosh, redirecting home");
            Ok(home())
        }
    }
}

async fn preview_swosh(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(swosh) = lookup(&state, &id).await? else {
        return Ok(home());
    };
    let uri = deeplink::payment_uri(&swosh);
    let qr = deeplink::qr_svg(&uri)?;
    Ok(Html(pages::preview_html(&swosh, &uri, &qr)).into_response())
}
