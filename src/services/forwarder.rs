//! 队列转发入口
//!
//! 校验 psk 与事件类型后入队，实际处理交给 worker。

use std::sync::Arc;

use tracing::{info, warn};

use super::auth::SharedSecret;
use super::queue::WorkQueue;
use crate::errors::{MastobanError, Result};
use crate::structs::{AccountEvent, Output};

pub struct QueueForwarder {
    secret: SharedSecret,
    queue: Option<Arc<dyn WorkQueue>>,
}

impl QueueForwarder {
    /// `queue` 为 None 表示未配置队列，此时所有合法请求都返回 `QueueUnavailable`
    pub fn new(secret: SharedSecret, queue: Option<Arc<dyn WorkQueue>>) -> Self {
        Self { secret, queue }
    }

    pub fn has_queue(&self) -> bool {
        self.queue.is_some()
    }

    /// 校验并入队，不等待处理结果
    ///
    /// 顺序：psk → JSON → 事件类型 → 入队。psk 不通过时不解析 body。
    pub async fn accept(&self, raw: &str, psk: Option<&str>) -> Result<Output> {
        self.secret.verify(psk)?;

        let event = AccountEvent::parse(raw)?;
        event.ensure_supported().inspect_err(|_| {
            warn!("Rejected event of type '{}'", event.event);
        })?;

        let queue = self
            .queue
            .as_ref()
            .ok_or_else(|| MastobanError::queue_unavailable("no queue configured"))?;
        queue.send(&event).await?;

        info!(
            user_id = %event.object.id,
            username = %event.object.username,
            "Queued {} event on {}",
            event.event,
            queue.name()
        );
        Ok(Output::accepted())
    }
}
