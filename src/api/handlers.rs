//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    ConfigResponse, ErrorResponse, GuessResponse, ModelInfo, SessionResponse, SuccessResponse,
    TextRequest,
};
use super::AppState;
use crate::game::TransitionError;
use crate::runtime::RuntimeError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the game page
        .route("/", get(serve_page))
        .route("/assets/*path", get(serve_static))
        // Sessions
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session))
        // Player actions
        .route("/api/sessions/:id/ask", post(ask_question))
        .route("/api/sessions/:id/hint", post(request_hint))
        .route("/api/sessions/:id/guess", post(submit_guess))
        .route("/api/sessions/:id/new", post(new_game))
        .route("/api/sessions/:id/delete", post(delete_session))
        // Rules and model
        .route("/api/config", get(get_config))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn serve_page() -> Response {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - page not embedded</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let snapshot = state.manager.create_session().await;
    let response = SessionResponse::new(snapshot, state.manager.config());
    (StatusCode::CREATED, Json(response))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let snapshot = state.manager.snapshot(&id).await?;
    Ok(Json(SessionResponse::new(snapshot, state.manager.config())))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.manager.remove(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Player Actions
// ============================================================

async fn ask_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TextRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let snapshot = state.manager.ask(&id, req.text).await?;
    Ok(Json(SessionResponse::new(snapshot, state.manager.config())))
}

async fn request_hint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let snapshot = state.manager.hint(&id).await?;
    Ok(Json(SessionResponse::new(snapshot, state.manager.config())))
}

async fn submit_guess(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TextRequest>,
) -> Result<Json<GuessResponse>, AppError> {
    let result = state.manager.guess(&id, req.text).await?;
    Ok(Json(GuessResponse {
        outcome: result.outcome,
        session: SessionResponse::new(result.snapshot, state.manager.config()),
    }))
}

async fn new_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let snapshot = state.manager.new_game(&id).await?;
    Ok(Json(SessionResponse::new(snapshot, state.manager.config())))
}

// ============================================================
// Info
// ============================================================

async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = state.manager.config();
    let registry = &state.llm_registry;
    let models = registry
        .available_model_info()
        .into_iter()
        .map(|m| ModelInfo {
            id: m.id.to_string(),
            provider: m.provider.display_name().to_string(),
            description: m.description.to_string(),
        })
        .collect();

    Json(ConfigResponse {
        variant: state.variant.name().to_string(),
        question_limit: config.question_limit,
        hint_budget: config.hint_budget,
        model: registry
            .has_models()
            .then(|| registry.default_model_id().to_string()),
        models,
        active_sessions: state.manager.len().await,
    })
}

async fn get_version() -> &'static str {
    concat!("twenty_questions ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(err: RuntimeError) -> Self {
        let message = err.to_string();
        match err {
            RuntimeError::SessionNotFound(_) => AppError::NotFound(message),
            RuntimeError::Rejected(
                TransitionError::EmptyQuestion | TransitionError::InvalidTransition(_),
            ) => AppError::BadRequest(message),
            RuntimeError::Rejected(_) => AppError::Conflict(message),
            RuntimeError::TaskFailed(_) => AppError::Internal(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
