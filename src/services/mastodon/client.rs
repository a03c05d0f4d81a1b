//! Mastodon Admin API 客户端
//!
//! 只实现一个动作：`POST /api/v1/admin/accounts/{id}/action`。
//! 不重试、不设置额外超时，失败直接上抛。

use async_trait::async_trait;
use tracing::{debug, info, warn};
use ureq::Agent;

use super::level::{SuspendLevel, SuspendRequest};
use crate::config::MastodonConfig;
use crate::errors::{MastobanError, Result};

/// 账号处置接口
///
/// 路由只依赖这个 trait，测试中可以替换为记录调用的实现。
#[async_trait]
pub trait AccountModerator: Send + Sync {
    /// 对账号执行一次管理动作；不去重，调用两次就发两次请求
    async fn suspend(&self, request: &SuspendRequest) -> Result<()>;
}

/// Mastodon Admin API 客户端
#[derive(Clone)]
pub struct MastodonClient {
    agent: Agent,
    instance: String,
    access_token: String,
}

impl std::fmt::Debug for MastodonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MastodonClient")
            .field("instance", &self.instance)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl MastodonClient {
    /// 创建客户端
    ///
    /// 实例地址与访问令牌都必须非空，否则在发出任何请求前失败。
    pub fn new(instance: &str, access_token: &str) -> Result<Self> {
        let instance = instance.trim().trim_end_matches('/');
        if instance.is_empty() {
            return Err(MastobanError::MissingInstance);
        }
        if access_token.is_empty() {
            return Err(MastobanError::MissingAccessToken);
        }

        // 非 2xx 也当作正常响应返回，由我们读取状态码和响应体
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            instance: instance.to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn from_config(config: &MastodonConfig) -> Result<Self> {
        Self::new(&config.instance_url, &config.access_token)
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// 管理动作的完整 URL
    pub fn action_url(&self, account_id: &str) -> String {
        format!(
            "{}/api/v1/admin/accounts/{}/action",
            self.instance,
            urlencoding::encode(account_id)
        )
    }

    /// 按字符串动作类型封禁账号
    ///
    /// 动作类型非法时返回 `InvalidSuspendLevel`，不会发出网络请求。
    pub async fn suspend_account(&self, account_id: &str, level: &str, notice: &str) -> Result<()> {
        let level = SuspendLevel::parse(level)?;
        self.suspend(&SuspendRequest::new(account_id, level, notice))
            .await
    }

    /// 发送表单请求（同步，在 spawn_blocking 中调用）
    fn post_action_sync(
        agent: Agent,
        url: String,
        access_token: String,
        request: SuspendRequest,
    ) -> Result<()> {
        let response = agent
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send_form([
                ("type", request.level.as_ref()),
                ("text", request.notice.as_str()),
                ("send_email_notification", "true"),
            ])
            .map_err(|e| MastobanError::transport(format!("POST {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        if status == 200 {
            return Ok(());
        }

        // 响应体里是失败原因
        let body = Self::failure_body(response.into_body().read_to_string());
        Err(MastobanError::RemoteActionFailed { status, body })
    }

    /// 读取失败时把原因写进 body，不吞掉
    fn failure_body(read: std::result::Result<String, ureq::Error>) -> String {
        read.unwrap_or_else(|e| format!("<unreadable body: {}>", e))
    }
}

#[async_trait]
impl AccountModerator for MastodonClient {
    async fn suspend(&self, request: &SuspendRequest) -> Result<()> {
        let url = self.action_url(&request.account_id);
        debug!(
            "Sending {} action for account {} to {}",
            request.level, request.account_id, self.instance
        );

        let agent = self.agent.clone();
        let token = self.access_token.clone();
        let owned = request.clone();
        let result = tokio::task::spawn_blocking(move || {
            Self::post_action_sync(agent, url, token, owned)
        })
        .await
        .map_err(|e| MastobanError::transport(format!("request task failed: {}", e)))?;

        match &result {
            Ok(()) => info!(
                account_id = %request.account_id,
                level = %request.level,
                "Admin action applied"
            ),
            Err(e) => warn!(
                account_id = %request.account_id,
                level = %request.level,
                "Admin action failed: {}",
                e
            ),
        }
        result
    }
}
