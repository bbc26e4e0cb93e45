//! 基础设施层：配置、日志、后端表存储客户端

pub mod backend;
pub mod config;
pub mod logger;
