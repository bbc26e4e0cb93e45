//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::app::users::model::PayloadError;
use crate::infrastructure::backend::BackendError;
use crate::infrastructure::config::ConfigError;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    NotFound(String),
    InternalServerError(String),
    BadGateway(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
    pub request_id: String,
}

impl CoreError {
    /// 统一的 "Not found"
    pub fn not_found() -> Self {
        CoreError::NotFound("Not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, user_message) = match self {
            CoreError::NotFound(msg) => ("NOT_FOUND", msg),
            CoreError::InternalServerError(msg) => ("INTERNAL_SERVER_ERROR", msg),
            CoreError::BadGateway(msg) => ("BAD_GATEWAY", msg),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: Uuid::new_v4().to_string(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<BackendError> for CoreError {
    fn from(err: BackendError) -> Self {
        error!("后端请求失败: {}", err);
        CoreError::BadGateway(err.to_string())
    }
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        warn!("后端配置缺失: {}", err);
        CoreError::InternalServerError(err.to_string())
    }
}

impl From<PayloadError> for CoreError {
    // 请求体解析失败统一按 500 返回，消息带上解析错误
    fn from(err: PayloadError) -> Self {
        CoreError::InternalServerError(err.to_string())
    }
}
