//! 系统处理器

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::core::error::CoreError;
use crate::router::AppState;

/// 配置探测结果，只报告是否配置，绝不回显值
#[derive(Debug, Serialize)]
pub struct EnvStatus {
    pub backend_url_configured: bool,
    pub backend_key_configured: bool,
}

/// 服务信息
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Users CRUD proxy for a REST table store",
        "endpoints": {
            "GET /users": "list users",
            "POST /users": "create a user",
            "GET /users/:id": "get a user",
            "PUT /users/:id": "update a user",
            "DELETE /users/:id": "delete a user",
            "GET /env": "backend configuration status",
            "GET /openapi.yaml": "OpenAPI document",
            "GET /docs": "API viewer"
        }
    }))
}

pub async fn env_status(State(state): State<AppState>) -> Json<EnvStatus> {
    let configured = |value: Option<String>| value.is_some_and(|v| !v.trim().is_empty());

    Json(EnvStatus {
        backend_url_configured: configured(state.settings.backend_url()),
        backend_key_configured: configured(state.settings.backend_key()),
    })
}

/// 兜底：未匹配的路径和方法
pub async fn not_found() -> CoreError {
    CoreError::not_found()
}
