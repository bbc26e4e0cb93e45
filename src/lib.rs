//! # 用户代理服务
//!
//! 基于 Axum 的用户 CRUD 服务，所有持久化操作都转发到外部 REST 表存储
//! （PostgREST 风格，例如 Supabase）。分层结构：
//! - `app`：用户、系统、文档等处理器
//! - `core`：统一错误、响应、中间件
//! - `infrastructure`：配置、日志、后端 HTTP 客户端
//! - `router`：路由装配

pub mod app;
pub mod core;
pub mod infrastructure;
pub mod router;

pub use infrastructure::config::{
    AppConfig, BackendSettings, BackendSettingsSource, EnvSettings, StaticSettings,
};
pub use router::{build_app, AppState};
