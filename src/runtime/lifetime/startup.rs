use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{
    EventRouter, MastodonClient, MaxMindLocator, QueueForwarder, RedisQueue, SharedSecret,
    SuspendPolicy, WorkQueue,
};

/// 服务器启动所需的组件
pub struct StartupContext {
    pub router: EventRouter,
    pub forwarder: QueueForwarder,
    pub secret: SharedSecret,
}

/// 打开 GeoIP 数据库并构造路由器
///
/// 数据库只在这里打开一次，之后以 `Arc` 共享给所有请求。
pub fn build_router(config: &AppConfig) -> Result<EventRouter> {
    let geoip = MaxMindLocator::open(config.geoip.database_path.as_deref())?;
    let client = MastodonClient::from_config(&config.mastodon)?;
    let policy = SuspendPolicy::from_config(&config.mastodon)?;
    debug!("Mastodon client configured for {}", client.instance());

    Ok(EventRouter::new(Arc::new(geoip), Arc::new(client), policy))
}

/// 构造队列；未配置时返回 None
pub fn build_queue(config: &AppConfig) -> Result<Option<Arc<dyn WorkQueue>>> {
    if !config.queue.is_enabled() {
        return Ok(None);
    }
    let queue = RedisQueue::from_config(&config.queue)?;
    Ok(Some(Arc::new(queue)))
}

/// 准备服务器启动的上下文（配置需已通过 `validate_server`）
pub fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let start_time = Instant::now();

    let router = build_router(config)?;
    let queue = build_queue(config)?;
    if queue.is_none() {
        warn!("No queue configured: /webhook will answer with 'unable to create queue instance'");
    }

    let secret = SharedSecret::new(config.webhook.psk.clone());
    let forwarder = QueueForwarder::new(secret.clone(), queue);

    info!(
        "Server components ready in {:?} (strict_auth={})",
        start_time.elapsed(),
        config.webhook.strict_auth
    );

    Ok(StartupContext {
        router,
        forwarder,
        secret,
    })
}
