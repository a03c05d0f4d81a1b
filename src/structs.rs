//! 入站事件与出站结果的数据结构

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{MastobanError, Result};

/// 唯一支持的事件类型
pub const EVENT_ACCOUNT_CREATED: &str = "account.created";

/// Mastodon `account.created` webhook 事件
///
/// 只保留判断与封禁需要的字段，其余字段（role、ips、account 等）忽略。
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AccountEvent {
    #[serde(deserialize_with = "null_as_empty")]
    pub event: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub created_at: String,
    pub object: AccountInfo,
}

/// 新注册账号信息
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AccountInfo {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    /// 本站账号为 null
    pub domain: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub ip: String,
}

/// 字符串字段遇到 null 时按空串处理
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl AccountEvent {
    /// 解析原始 JSON
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| MastobanError::parse(e.to_string()))
    }

    /// 确认事件类型为 `account.created`
    pub fn ensure_supported(&self) -> Result<()> {
        if self.event == EVENT_ACCOUNT_CREATED {
            Ok(())
        } else {
            Err(MastobanError::UnsupportedEventType(self.event.clone()))
        }
    }
}

impl AccountInfo {
    pub fn domain_or_empty(&self) -> &str {
        self.domain.as_deref().unwrap_or_default()
    }
}

/// 成功状态
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// 来自本国，不处理
    Ok,
    /// 已封禁
    Suspended,
    /// 已入队，异步处理
    Accepted,
}

/// 错误体
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub msg: String,
    pub err_ref: String,
}

/// 返回给调用方的 JSON 结果
///
/// 成功时携带 status（以及 id/username），失败时只携带 error。
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Output {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    /// worker 批处理中被封禁的账号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<AccountInfo>>,
}

impl Output {
    pub fn success(status: Status, account: &AccountInfo) -> Self {
        Self {
            status: Some(status),
            id: Some(account.id.clone()),
            username: Some(account.username.clone()),
            ..Default::default()
        }
    }

    pub fn accepted() -> Self {
        Self {
            status: Some(Status::Accepted),
            ..Default::default()
        }
    }

    /// 以给定的关联 ID 构造错误结果
    pub fn failure(err: &MastobanError, err_ref: String) -> Self {
        Self {
            error: Some(ErrorBody {
                msg: err.public_message(),
                err_ref,
            }),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
