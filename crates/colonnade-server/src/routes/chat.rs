use axum::Json;
use axum::extract::{Path, Query, State};
use colonnade_core::models::conversation::Conversation;
use colonnade_core::models::message::Message;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    #[serde(default = "default_latest_limit")]
    pub limit: i64,
}

fn default_latest_limit() -> i64 {
    50
}

fn conversation_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid conversation id: {raw}")))
}

pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Conversation>>, ApiError> {
    Ok(Json(state.chat.list_conversations().await?))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Conversation>, ApiError> {
    let id = conversation_id(&id)?;
    Ok(Json(state.chat.require_conversation(id).await?))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let id = conversation_id(&id)?;
    Ok(Json(state.chat.list_messages(id).await?))
}

pub async fn latest_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LatestParams>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let id = conversation_id(&id)?;
    Ok(Json(state.chat.latest_messages(id, params.limit).await?))
}

pub async fn health() -> &'static str {
    "Chat API is running!"
}
