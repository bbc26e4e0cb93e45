//! 系统处理器：服务信息、配置探测、兜底 404

pub mod handler;
