use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::errors::{MastobanError, Result};

/// Mastodon 管理动作类型
///
/// 见 https://docs.joinmastodon.org/methods/admin/accounts/#action
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SuspendLevel {
    None,
    Sensitive,
    Disable,
    Silence,
    Suspend,
}

impl SuspendLevel {
    /// 解析动作类型（大小写不敏感），非法值返回 `InvalidSuspendLevel`
    pub fn parse(level: &str) -> Result<Self> {
        level
            .trim()
            .parse()
            .map_err(|_| MastobanError::InvalidSuspendLevel(level.to_string()))
    }

    /// 所有合法取值，用于帮助信息
    pub fn variants() -> Vec<&'static str> {
        Self::iter().map(<&'static str>::from).collect()
    }
}

impl std::fmt::Display for SuspendLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// 一次封禁请求
///
/// 只能通过合法的 `SuspendLevel` 构造，非法动作类型不会出现在请求里。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspendRequest {
    pub account_id: String,
    pub level: SuspendLevel,
    pub notice: String,
}

impl SuspendRequest {
    pub fn new(account_id: impl Into<String>, level: SuspendLevel, notice: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            level,
            notice: notice.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_levels_any_case() {
        for (input, expected) in [
            ("none", SuspendLevel::None),
            ("SENSITIVE", SuspendLevel::Sensitive),
            ("Disable", SuspendLevel::Disable),
            ("sIlEnCe", SuspendLevel::Silence),
            ("suspend", SuspendLevel::Suspend),
            (" suspend ", SuspendLevel::Suspend),
        ] {
            assert_eq!(SuspendLevel::parse(input).unwrap(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_invalid_levels() {
        for input in ["", "ban", "suspended", "delete", "none,suspend"] {
            let err = SuspendLevel::parse(input).unwrap_err();
            assert!(
                matches!(err, MastobanError::InvalidSuspendLevel(ref v) if v == input),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_wire_value_is_lowercase() {
        assert_eq!(SuspendLevel::parse("SILENCE").unwrap().as_ref(), "silence");
        assert_eq!(
            SuspendLevel::variants(),
            vec!["none", "sensitive", "disable", "silence", "suspend"]
        );
    }
}
