//! 事件路由
//!
//! 解析事件 → 解析 IP → GeoIP 查询 → 判断 → 必要时封禁。
//! 单条（同步 webhook）与批量（队列 worker）共用同一套逐条逻辑。

use std::net::IpAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use super::geoip::{GeoIpLookup, GeoRecord};
use super::mastodon::{AccountModerator, SuspendLevel, SuspendRequest};
use crate::config::MastodonConfig;
use crate::errors::{MastobanError, Result, new_err_ref};
use crate::structs::{AccountEvent, AccountInfo, Output, Status};

/// 封禁策略（来自已校验的配置）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspendPolicy {
    /// 大写的 ISO 国家代码
    pub home_country: String,
    pub level: SuspendLevel,
    pub notice: String,
}

impl SuspendPolicy {
    pub fn new(home_country: &str, level: SuspendLevel, notice: impl Into<String>) -> Self {
        Self {
            home_country: home_country.trim().to_ascii_uppercase(),
            level,
            notice: notice.into(),
        }
    }

    pub fn from_config(config: &MastodonConfig) -> Result<Self> {
        let level = SuspendLevel::parse(&config.suspend_level)?;
        Ok(Self::new(
            &config.home_country_code(),
            level,
            config.suspend_text.clone(),
        ))
    }
}

/// 单条事件的处理结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 来自本国，不处理
    Allowed,
    /// 已执行封禁
    Suspended,
}

impl Verdict {
    pub fn status(self) -> Status {
        match self {
            Verdict::Allowed => Status::Ok,
            Verdict::Suspended => Status::Suspended,
        }
    }
}

/// 单条事件的处理结果
#[derive(Debug, Clone)]
pub struct Assessment {
    pub account: AccountInfo,
    pub geo: GeoRecord,
    pub verdict: Verdict,
}

impl Assessment {
    pub fn to_output(&self) -> Output {
        Output::success(self.verdict.status(), &self.account)
    }
}

/// 批处理汇总
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// 按处理顺序记录的已封禁账号
    pub suspended: Vec<AccountInfo>,
    pub allowed: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.suspended.len() + self.allowed + self.failed
    }

    pub fn to_output(&self) -> Output {
        Output {
            status: Some(Status::Suspended),
            users: Some(self.suspended.clone()),
            ..Default::default()
        }
    }
}

/// 事件路由器
///
/// GeoIP 句柄与客户端都是只读共享的，可以在多个请求间 clone 使用。
#[derive(Clone)]
pub struct EventRouter {
    geoip: Arc<dyn GeoIpLookup>,
    moderator: Arc<dyn AccountModerator>,
    policy: SuspendPolicy,
}

impl EventRouter {
    pub fn new(
        geoip: Arc<dyn GeoIpLookup>,
        moderator: Arc<dyn AccountModerator>,
        policy: SuspendPolicy,
    ) -> Self {
        info!(
            "EventRouter ready: provider={}, home_country={}, level={}",
            geoip.name(),
            policy.home_country,
            policy.level
        );
        Self {
            geoip,
            moderator,
            policy,
        }
    }

    pub fn policy(&self) -> &SuspendPolicy {
        &self.policy
    }

    /// 处理原始 JSON 事件
    pub async fn handle_raw(&self, raw: &str) -> Result<Assessment> {
        let event = AccountEvent::parse(raw)?;
        self.handle_event(&event).await
    }

    /// 处理已解析的事件
    pub async fn handle_event(&self, event: &AccountEvent) -> Result<Assessment> {
        event.ensure_supported()?;
        let account = &event.object;

        let ip: IpAddr = account.ip.trim().parse().map_err(|_| {
            warn!(
                ip = %account.ip,
                user_id = %account.id,
                username = %account.username,
                "Failed to parse signup IP address"
            );
            MastobanError::invalid_ip(format!("'{}' is not an IP address", account.ip))
        })?;

        let geo = self.geoip.lookup(ip).inspect_err(|e| {
            warn!(
                ip = %ip,
                user_id = %account.id,
                username = %account.username,
                "Failed to lookup IP address in GeoIP database: {}",
                e
            );
        })?;

        if geo.country.eq_ignore_ascii_case(&self.policy.home_country) {
            info!(
                ip = %geo.ip,
                continent = %geo.continent,
                country = %geo.country,
                user_id = %account.id,
                username = %account.username,
                domain = account.domain_or_empty(),
                email = %account.email,
                created_at = %account.created_at,
                "IP is from {}. Doing nothing.",
                self.policy.home_country
            );
            return Ok(Assessment {
                account: account.clone(),
                geo,
                verdict: Verdict::Allowed,
            });
        }

        let request = SuspendRequest::new(&account.id, self.policy.level, &self.policy.notice);
        if let Err(e) = self.moderator.suspend(&request).await {
            warn!(
                ip = %geo.ip,
                continent = %geo.continent,
                country = %geo.country,
                user_id = %account.id,
                username = %account.username,
                "Failed to suspend user: {}",
                e
            );
            return Err(MastobanError::suspend_failed(e));
        }

        info!(
            ip = %geo.ip,
            continent = %geo.continent,
            country = %geo.country,
            user_id = %account.id,
            username = %account.username,
            domain = account.domain_or_empty(),
            email = %account.email,
            created_at = %account.created_at,
            level = %self.policy.level,
            "IP is not from {}. Account suspended!",
            self.policy.home_country
        );

        Ok(Assessment {
            account: account.clone(),
            geo,
            verdict: Verdict::Suspended,
        })
    }

    /// 按顺序处理一批队列消息
    ///
    /// 单条失败只记录日志并跳过，不影响其余消息。
    pub async fn process_batch<I, S>(&self, messages: I) -> BatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = BatchReport::default();

        for (index, message) in messages.into_iter().enumerate() {
            let raw = message.as_ref();
            match self.handle_raw(raw).await {
                Ok(assessment) => match assessment.verdict {
                    Verdict::Allowed => report.allowed += 1,
                    Verdict::Suspended => report.suspended.push(assessment.account),
                },
                Err(e) => {
                    let err_ref = new_err_ref();
                    error!(
                        err_ref = %err_ref,
                        code = e.code(),
                        index,
                        body = raw,
                        "Skipping queued message: {}",
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            "Batch processed: {} message(s), {} suspended, {} allowed, {} failed",
            report.processed(),
            report.suspended.len(),
            report.allowed,
            report.failed
        );
        report
    }
}
