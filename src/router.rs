//! 路由装配

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{docs, system, users};
use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::backend::BackendClient;
use crate::infrastructure::config::BackendSettingsSource;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub user_service: users::UserService,
    pub settings: Arc<dyn BackendSettingsSource>,
}

impl AppState {
    pub fn new(settings: Arc<dyn BackendSettingsSource>) -> Self {
        Self::with_client(BackendClient::new(), settings)
    }

    pub fn with_client(client: BackendClient, settings: Arc<dyn BackendSettingsSource>) -> Self {
        Self {
            user_service: users::UserService::new(client, settings.clone()),
            settings,
        }
    }
}

/// 创建路由；已知路径上的未知方法同样返回 404
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(system::handler::api_info).fallback(system::handler::not_found))
        .route("/env", get(system::handler::env_status).fallback(system::handler::not_found))
        .route("/openapi.yaml", get(docs::openapi_yaml).fallback(system::handler::not_found))
        .route("/docs", get(docs::docs_page).fallback(system::handler::not_found))
        .route(
            "/users",
            post(users::handler::create_user)
                .get(users::handler::list_users)
                .fallback(system::handler::not_found),
        )
        .route(
            "/users/:id",
            get(users::handler::get_user)
                .put(users::handler::update_user)
                .delete(users::handler::delete_user)
                .fallback(system::handler::not_found),
        )
        .fallback(system::handler::not_found)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::StaticSettings;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app(settings: StaticSettings) -> Router {
        build_app(AppState::new(Arc::new(settings)))
    }

    fn bare_app() -> Router {
        app(StaticSettings::unconfigured())
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn unmatched_path_is_not_found() {
        let (status, body) = call(bare_app(), Method::GET, "/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn unmatched_method_is_not_found() {
        let (status, _) = call(bare_app(), Method::PATCH, "/users/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(bare_app(), Method::DELETE, "/users").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(bare_app(), Method::POST, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn nested_user_path_is_not_found() {
        let (status, _) = call(bare_app(), Method::GET, "/users/1/profile").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn env_reports_flags_without_values() {
        let settings = StaticSettings::new("https://secret-project.example.co", "secret-key");
        let (status, body) = call(app(settings), Method::GET, "/env").await;
        assert_eq!(status, StatusCode::OK);

        let text = String::from_utf8(body).unwrap();
        assert!(!text.contains("secret-project"));
        assert!(!text.contains("secret-key"));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["backend_url_configured"], true);
        assert_eq!(value["backend_key_configured"], true);
    }

    #[tokio::test]
    async fn env_reports_missing_settings() {
        let (_, body) = call(bare_app(), Method::GET, "/env").await;
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["backend_url_configured"], false);
        assert_eq!(value["backend_key_configured"], false);
    }

    #[tokio::test]
    async fn docs_routes_serve_static_content() {
        let response = bare_app()
            .oneshot(Request::get("/openapi.yaml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/yaml");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"openapi: 3"));

        let (status, body) = call(bare_app(), Method::GET, "/docs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("/openapi.yaml"));
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let (status, body) = call(bare_app(), Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["endpoints"]["GET /users/:id"].is_string());
    }

    #[tokio::test]
    async fn user_routes_need_backend_settings() {
        let (status, body) = call(bare_app(), Method::GET, "/users").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["message"].as_str().unwrap().contains("SUPABASE_URL"));
    }

    #[tokio::test]
    async fn responses_carry_cors_headers() {
        let response = bare_app()
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "https://example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn preflight_is_answered_by_cors_layer() {
        let response = bare_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/users")
                    .header(header::ORIGIN, "https://example.org")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
    }
}
