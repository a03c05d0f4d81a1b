//! 预共享密钥（psk）校验

use subtle::ConstantTimeEq;

use crate::errors::{MastobanError, Result};

pub const MSG_MISSING_PSK: &str = "missing psk query param";
pub const MSG_INVALID_PSK: &str = "provided PSK is invalid";

/// webhook 调用方必须在 `?psk=` 中携带的共享密钥
#[derive(Clone)]
pub struct SharedSecret {
    secret: String,
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// 校验调用方提供的 psk
    ///
    /// 未提供 → "missing psk query param"；不匹配（含空值）→ "provided PSK is invalid"。
    /// 本端未配置密钥时一律拒绝。
    pub fn verify(&self, provided: Option<&str>) -> Result<()> {
        if self.secret.is_empty() {
            return Err(MastobanError::config_missing("webhook.psk"));
        }

        // `?psk=` 存在但为空按不匹配处理
        let Some(provided) = provided else {
            return Err(MastobanError::auth(MSG_MISSING_PSK));
        };

        if constant_time_compare(provided, &self.secret) {
            Ok(())
        } else {
            Err(MastobanError::auth(MSG_INVALID_PSK))
        }
    }
}

/// 常量时间比较两个字符串
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
