//! 配置校验
//!
//! 启动时按运行模式一次性校验，缺失必填项直接失败，不在请求处理中途才发现。

use super::{AppConfig, MastodonConfig, QueueConfig, WebhookConfig};
use crate::errors::{MastobanError, Result};
use crate::services::mastodon::SuspendLevel;

impl MastodonConfig {
    /// 校验实例地址、令牌与封禁策略
    pub fn validate(&self) -> Result<()> {
        if self.instance_url.trim().is_empty() {
            return Err(MastobanError::config_missing("mastodon.instance_url"));
        }
        url::Url::parse(self.instance_url.trim()).map_err(|e| {
            MastobanError::invalid_config(format!(
                "mastodon.instance_url '{}' is not a valid URL: {}",
                self.instance_url, e
            ))
        })?;

        if self.access_token.is_empty() {
            return Err(MastobanError::config_missing("mastodon.access_token"));
        }
        if self.suspend_text.is_empty() {
            return Err(MastobanError::config_missing("mastodon.suspend_text"));
        }
        if self.suspend_level.is_empty() {
            return Err(MastobanError::config_missing("mastodon.suspend_level"));
        }
        SuspendLevel::parse(&self.suspend_level).map_err(|_| {
            MastobanError::invalid_config(format!(
                "mastodon.suspend_level '{}' must be one of: none, sensitive, disable, silence, suspend",
                self.suspend_level
            ))
        })?;

        let country = self.home_country_code();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MastobanError::invalid_config(format!(
                "mastodon.home_country '{}' is not an ISO 3166-1 alpha-2 code",
                self.home_country
            )));
        }

        Ok(())
    }

    /// 规范化后的国家代码（大写、去空白）
    pub fn home_country_code(&self) -> String {
        self.home_country.trim().to_ascii_uppercase()
    }
}

impl WebhookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.psk.is_empty() {
            return Err(MastobanError::config_missing("webhook.psk"));
        }
        Ok(())
    }
}

impl QueueConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(MastobanError::config_missing("queue.url"));
        }
        if self.key.is_empty() {
            return Err(MastobanError::config_missing("queue.key"));
        }
        if self.batch_size == 0 {
            return Err(MastobanError::invalid_config(
                "queue.batch_size must be greater than 0",
            ));
        }
        Ok(())
    }

    /// 是否配置了队列
    pub fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl AppConfig {
    /// HTTP 模式：同步入口需要 mastodon + psk；队列可选，配置了就要合法
    pub fn validate_server(&self) -> Result<()> {
        self.mastodon.validate()?;
        self.webhook.validate()?;
        if self.queue.is_enabled() {
            self.queue.validate()?;
        }
        Ok(())
    }

    /// Worker 模式：mastodon + 队列
    pub fn validate_worker(&self) -> Result<()> {
        self.mastodon.validate()?;
        self.queue.validate()
    }
}
