//! 静态文档：OpenAPI 描述与 HTML 查看器

use axum::{
    http::header,
    response::{Html, IntoResponse},
};

pub const OPENAPI_YAML: &str = include_str!("openapi.yaml");
pub const DOCS_HTML: &str = include_str!("docs.html");

pub async fn openapi_yaml() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/yaml")], OPENAPI_YAML)
}

pub async fn docs_page() -> Html<&'static str> {
    Html(DOCS_HTML)
}
