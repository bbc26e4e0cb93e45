//! 用户处理器

use axum::{
    body::Bytes,
    extract::{Path, State},
};

use super::model::UserPayload;
use crate::core::{error::CoreError, response::Relayed};
use crate::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Relayed, CoreError> {
    let payload = UserPayload::from_slice(&body)?;
    state.user_service.create_user(payload).await
}

pub async fn list_users(State(state): State<AppState>) -> Result<Relayed, CoreError> {
    state.user_service.list_users().await
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Relayed, CoreError> {
    state.user_service.get_user(&id).await
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Relayed, CoreError> {
    let payload = UserPayload::from_slice(&body)?;
    state.user_service.update_user(&id, payload).await
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Relayed, CoreError> {
    state.user_service.delete_user(&id).await
}
