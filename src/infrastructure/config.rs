//! 配置基础设施
//!
//! 两类配置：
//! - `AppConfig`：进程启动时读取一次（监听地址、端口、日志级别）
//! - 后端表存储的地址和密钥：通过 `BackendSettingsSource` 在每次请求时读取

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use thiserror::Error;

/// 后端地址环境变量
pub const BACKEND_URL_VAR: &str = "SUPABASE_URL";
/// 后端密钥环境变量
pub const BACKEND_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("backend setting {0} is not configured")]
    Missing(&'static str),

    #[error("invalid port {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid bind address {0:?}")]
    InvalidAddress(String),
}

/// 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8787,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 默认值 + 环境变量覆盖 (`BIND_ADDRESS`, `PORT`, `LOG_LEVEL`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(address) = lookup("BIND_ADDRESS").filter(|v| !v.trim().is_empty()) {
            config.http.bind_address = address.trim().to_string();
        }

        if let Some(port) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            config.http.port = port
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort {
                    value: port.clone(),
                    source,
                })?;
        }

        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            config.logging.level = level.trim().to_string();
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.http.bind_address, self.http.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

/// 后端表存储连接信息
#[derive(Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub url: String,
    pub key: String,
}

impl BackendSettings {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
        }
    }

    /// `<base>/rest/v1/<table>`
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), table)
    }
}

// 密钥不进日志
impl fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSettings")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// 后端配置来源，每次请求调用一次
pub trait BackendSettingsSource: Send + Sync {
    fn backend_url(&self) -> Option<String>;

    fn backend_key(&self) -> Option<String>;

    fn settings(&self) -> Result<BackendSettings, ConfigError> {
        let url = non_empty(self.backend_url()).ok_or(ConfigError::Missing(BACKEND_URL_VAR))?;
        let key = non_empty(self.backend_key()).ok_or(ConfigError::Missing(BACKEND_KEY_VAR))?;
        Ok(BackendSettings { url, key })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 从进程环境变量读取
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl BackendSettingsSource for EnvSettings {
    fn backend_url(&self) -> Option<String> {
        std::env::var(BACKEND_URL_VAR).ok()
    }

    fn backend_key(&self) -> Option<String> {
        std::env::var(BACKEND_KEY_VAR).ok()
    }
}

/// 固定配置
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    url: Option<String>,
    key: Option<String>,
}

impl StaticSettings {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            key: Some(key.into()),
        }
    }

    /// 未配置任何后端
    pub fn unconfigured() -> Self {
        Self::default()
    }
}

impl BackendSettingsSource for StaticSettings {
    fn backend_url(&self) -> Option<String> {
        self.url.clone()
    }

    fn backend_key(&self) -> Option<String> {
        self.key.clone()
    }
}
