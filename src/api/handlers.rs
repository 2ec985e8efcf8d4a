//! HTTP request handlers

use super::assets;
use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, ConversationResponse, ErrorResponse, FormatRequest,
    FormatResponse, HistoryEntry, ResetResponse, RespondRequest, RespondResponse,
    SuccessResponse, TopicInfo, TopicsResponse, VersionResponse,
};
use super::AppState;
use crate::assistant::{format_links, respond, Topic};
use crate::catalog::{catalog, Catalog};
use crate::conversation::{is_blank, Conversation, Message, Sender};
use crate::runtime::{RuntimeError, SseEvent};
use crate::state_machine::Event;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(main_page))
        .route("/learning", get(learning_page))
        .route("/YouTubeLearningChatbot", get(chatbot_page))
        .route("/learning-paths/:topic", get(learning_path_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_asset))
        // Conversations
        .route("/api/conversations/new", post(create_conversation))
        .route("/api/conversations/:id", get(get_conversation))
        .route("/api/conversations/:id/stream", get(stream_conversation))
        .route("/api/conversations/:id/chat", post(send_chat))
        .route("/api/conversations/:id/reset", post(reset_conversation))
        .route("/api/conversations/:id/delete", post(delete_conversation))
        // Stateless assistant
        .route("/api/respond", post(respond_once))
        .route("/api/format", post(format_text))
        .route("/api/topics", get(list_topics))
        .route("/api/catalog", get(get_catalog))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Pages
// ============================================================

async fn main_page(State(state): State<AppState>) -> Response {
    assets::serve(&state.ui_dir, "index.html")
}

async fn learning_page(State(state): State<AppState>) -> Response {
    assets::serve(&state.ui_dir, "learning.html")
}

async fn chatbot_page(State(state): State<AppState>) -> Response {
    assets::serve(&state.ui_dir, "chatbot.html")
}

async fn learning_path_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let topic = Topic::from_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("No learning path for {slug}")))?;
    Ok(assets::serve(
        &state.ui_dir,
        &format!("learning-paths/{}.html", topic.slug()),
    ))
}

async fn serve_asset(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    assets::serve(&state.ui_dir, &format!("assets/{path}"))
}

// ============================================================
// Conversations
// ============================================================

async fn create_conversation(State(state): State<AppState>) -> Json<ConversationResponse> {
    let (id, snapshot) = state.runtime.create().await;
    Json(ConversationResponse::new(id, &snapshot))
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationResponse>, AppError> {
    let snapshot = state.runtime.snapshot(&id).await?;
    Ok(Json(ConversationResponse::new(id, &snapshot)))
}

async fn stream_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (snapshot, broadcast_rx) = state.runtime.subscribe(&id).await?;
    Ok(sse_stream(SseEvent::Init { snapshot }, broadcast_rx))
}

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    // Blank input is dropped without complaint
    if is_blank(&req.text) {
        state.runtime.snapshot(&id).await?;
        return Ok(Json(ChatResponse { queued: false }));
    }

    state
        .runtime
        .send_event(&id, Event::user_message(req.text))
        .await?;

    Ok(Json(ChatResponse { queued: true }))
}

async fn reset_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResetResponse>, AppError> {
    state.runtime.send_event(&id, Event::reset()).await?;
    Ok(Json(ResetResponse { ok: true }))
}

async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.runtime.remove(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Stateless assistant
// ============================================================

async fn respond_once(
    Json(req): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, AppError> {
    if is_blank(&req.text) {
        return Err(AppError::BadRequest("Message is empty".to_string()));
    }

    let history = match req.history {
        Some(entries) => history_from_entries(&entries),
        None => Conversation::new(Utc::now()).messages().to_vec(),
    };
    let reply = respond(&history, &req.text);
    let segments = format_links(&reply.text);

    Ok(Json(RespondResponse {
        text: reply.text,
        has_link: reply.has_link,
        segments,
    }))
}

fn history_from_entries(entries: &[HistoryEntry]) -> Vec<Message> {
    let now = Utc::now();
    entries
        .iter()
        .zip(1u64..)
        .map(|(entry, id)| match entry.sender {
            Sender::User => Message::user(id, entry.text.clone(), now),
            Sender::Bot => Message::bot(id, entry.text.clone(), entry.has_link, now),
        })
        .collect()
}

async fn format_text(Json(req): Json<FormatRequest>) -> Json<FormatResponse> {
    Json(FormatResponse {
        segments: format_links(&req.text),
    })
}

async fn list_topics() -> Json<TopicsResponse> {
    let topics = Topic::ALL
        .into_iter()
        .map(|topic| TopicInfo {
            topic,
            name: topic.display_name(),
            path: topic.path(),
        })
        .collect();
    Json(TopicsResponse { topics })
}

async fn get_catalog() -> Json<Catalog> {
    Json(catalog())
}

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        match e {
            RuntimeError::NotFound(_) => AppError::NotFound(e.to_string()),
            RuntimeError::Closed(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
