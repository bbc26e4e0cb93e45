//! 应用层

pub mod docs;
pub mod system;
pub mod users;
