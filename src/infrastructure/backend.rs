//! 后端表存储客户端
//!
//! 每个入站请求只发出一次出站调用：`<base>/rest/v1/<table>?<filters>`，
//! 带固定的认证头，要求后端返回受影响的行。不重试、不设超时。

use reqwest::{header, Client, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::config::BackendSettings;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned non-JSON body (status {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// 后端响应：状态码 + 已解析的 JSON
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 结果列表的第一行；不是列表或为空时返回 `None`
    pub fn first_row(&self) -> Option<&Value> {
        self.body.as_array().and_then(|rows| rows.first())
    }
}

/// PostgREST 风格过滤条件：`column=eq.value`
pub fn eq_filter(column: &str, value: &str) -> (String, String) {
    (column.to_string(), format!("eq.{}", value))
}

/// 选择所有列：`select=*`
pub fn select_all() -> (String, String) {
    ("select".to_string(), "*".to_string())
}

#[derive(Clone, Default)]
pub struct BackendClient {
    http: Client,
}

impl BackendClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    pub async fn send(
        &self,
        settings: &BackendSettings,
        method: Method,
        table: &str,
        filters: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<BackendResponse, BackendError> {
        let url = settings.rest_url(table);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("apikey", &settings.key)
            .bearer_auth(&settings.key)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation");

        if !filters.is_empty() {
            request = request.query(filters);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        debug!("后端 {} {} -> {} ({} 字节)", method, table, status, bytes.len());

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|source| BackendError::InvalidBody {
                status: status.as_u16(),
                source,
            })?
        };

        Ok(BackendResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_use_postgrest_syntax() {
        assert_eq!(eq_filter("id", "42"), ("id".to_string(), "eq.42".to_string()));
        assert_eq!(select_all(), ("select".to_string(), "*".to_string()));
    }

    #[test]
    fn first_row_only_for_non_empty_lists() {
        let rows = BackendResponse {
            status: StatusCode::OK,
            body: json!([{ "id": 1 }, { "id": 2 }]),
        };
        assert_eq!(rows.first_row(), Some(&json!({ "id": 1 })));

        let empty = BackendResponse {
            status: StatusCode::OK,
            body: json!([]),
        };
        assert_eq!(empty.first_row(), None);

        let object = BackendResponse {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "message": "bad" }),
        };
        assert_eq!(object.first_row(), None);
        assert!(!object.is_success());
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // 端口 1 上通常没有服务
        let settings = BackendSettings::new("http://127.0.0.1:1", "k");
        let client = BackendClient::with_client(Client::builder().no_proxy().build().unwrap());
        let result = client
            .send(&settings, Method::GET, "users", &[select_all()], None)
            .await;
        assert!(matches!(result, Err(BackendError::Transport(_))));
    }
}
