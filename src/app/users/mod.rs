//! 用户资源：模型、服务、处理器

pub mod handler;
pub mod model;
pub mod service;

pub use model::{PayloadError, UserPayload};
pub use service::UserService;
