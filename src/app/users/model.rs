//! 用户数据模型

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// 表名
pub const USERS_TABLE: &str = "users";

/// 转发给后端的可写字段
pub const USER_FIELDS: [&str; 3] = ["name", "email", "phone"];

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,
}

/// 请求体中的可写字段，值原样转发，不做类型检查。
/// 缺省字段不发给后端；显式的 `null` 会发出去（清空该列）。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserPayload(Map<String, Value>);

impl UserPayload {
    /// 解析请求体，只保留 `name`、`email`、`phone`
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PayloadError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(mut body) => Ok(Self(
                USER_FIELDS
                    .iter()
                    .filter_map(|field| body.remove_entry(*field))
                    .collect(),
            )),
            _ => Err(PayloadError::NotAnObject),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_drops_unknown_and_absent_fields() {
        let payload = UserPayload::from_slice(br#"{"name":"Ana","role":"admin"}"#).unwrap();
        assert_eq!(payload.get("name"), Some(&json!("Ana")));
        assert_eq!(payload.into_value(), json!({ "name": "Ana" }));
    }

    #[test]
    fn payload_keeps_non_string_values() {
        let payload = UserPayload::from_slice(br#"{"name":"Ana","phone":5551234}"#).unwrap();
        assert_eq!(payload.into_value(), json!({ "name": "Ana", "phone": 5551234 }));
    }

    #[test]
    fn explicit_null_is_forwarded() {
        let payload = UserPayload::from_slice(br#"{"phone":null}"#).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({ "phone": null }));
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let bodies: [&[u8]; 4] = [br#"["a","b","c"]"#, b"null", b"42", br#""Ana""#];
        for body in bodies {
            assert!(matches!(
                UserPayload::from_slice(body),
                Err(PayloadError::NotAnObject)
            ));
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            UserPayload::from_slice(b"not json"),
            Err(PayloadError::Malformed(_))
        ));
        assert!(matches!(UserPayload::from_slice(b""), Err(PayloadError::Malformed(_))));
    }
}
