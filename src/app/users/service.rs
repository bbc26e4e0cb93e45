//! 用户业务服务
//!
//! 所有操作都是 请求 -> 后端 -> 响应 的单线流程，本服务不保存任何状态。

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::model::{UserPayload, USERS_TABLE};
use crate::core::error::CoreError;
use crate::core::response::Relayed;
use crate::infrastructure::backend::{eq_filter, select_all, BackendClient, BackendResponse};
use crate::infrastructure::config::{BackendSettings, BackendSettingsSource};

#[derive(Clone)]
pub struct UserService {
    client: BackendClient,
    settings: Arc<dyn BackendSettingsSource>,
}

impl UserService {
    pub fn new(client: BackendClient, settings: Arc<dyn BackendSettingsSource>) -> Self {
        Self { client, settings }
    }

    // 每次请求重新读取，配置可以在运行期变更
    fn settings(&self) -> Result<BackendSettings, CoreError> {
        Ok(self.settings.settings()?)
    }

    async fn call(
        &self,
        method: Method,
        filters: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<BackendResponse, CoreError> {
        let settings = self.settings()?;
        Ok(self
            .client
            .send(&settings, method, USERS_TABLE, filters, body)
            .await?)
    }

    /// 创建用户：以单元素列表发送，返回结果列表的第一个元素
    pub async fn create_user(&self, payload: UserPayload) -> Result<Relayed, CoreError> {
        let body = Value::Array(vec![payload.into_value()]);
        let response = self.call(Method::POST, &[], Some(&body)).await?;

        if let (true, Some(row)) = (response.is_success(), response.first_row()) {
            let id = row.get("id").unwrap_or(&Value::Null);
            info!("创建用户成功: id={}", id);
            return Ok(Relayed::new(response.status, row.clone()));
        }

        Ok(Relayed::new(response.status, response.body))
    }

    /// 获取所有用户，原样返回
    pub async fn list_users(&self) -> Result<Relayed, CoreError> {
        let response = self.call(Method::GET, &[select_all()], None).await?;
        Ok(Relayed::new(response.status, response.body))
    }

    pub async fn get_user(&self, id: &str) -> Result<Relayed, CoreError> {
        let response = self.call(Method::GET, &[eq_filter("id", id)], None).await?;
        single_row(response)
    }

    /// 部分更新：只覆盖提供的字段
    pub async fn update_user(&self, id: &str, payload: UserPayload) -> Result<Relayed, CoreError> {
        let body = payload.into_value();
        let response = self
            .call(Method::PATCH, &[eq_filter("id", id)], Some(&body))
            .await?;
        single_row(response)
    }

    /// 删除用户，返回被删除记录删除前的内容
    pub async fn delete_user(&self, id: &str) -> Result<Relayed, CoreError> {
        let response = self.call(Method::DELETE, &[eq_filter("id", id)], None).await?;
        let relayed = single_row(response)?;
        info!("删除用户: id={}", id);
        Ok(relayed)
    }
}

/// 按 id 访问的结果：后端出错原样转发，空结果为 404，否则返回唯一一行
pub fn single_row(response: BackendResponse) -> Result<Relayed, CoreError> {
    if !response.is_success() {
        return Ok(Relayed::new(response.status, response.body));
    }

    match response.first_row() {
        Some(row) => Ok(Relayed::new(response.status, row.clone())),
        None => Err(CoreError::not_found()),
    }
}
