use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use super::WorkQueue;
use crate::config::QueueConfig;
use crate::errors::{MastobanError, Result};
use crate::structs::AccountEvent;

/// 基于 Redis list 的工作队列
///
/// LPUSH 入队，RPOP 出队，保持先进先出。
pub struct RedisQueue {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    key: String,
}

impl RedisQueue {
    /// 创建队列句柄
    ///
    /// 只校验 URL，不在这里建立连接；第一次收发时再连。
    pub fn new(url: &str, key: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            MastobanError::queue_unavailable(format!("invalid queue URL '{}': {}", url, e))
        })?;

        debug!("RedisQueue created with key: '{}'", key);

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            key: key.to_string(),
        })
    }

    pub fn from_config(config: &QueueConfig) -> Result<Self> {
        Self::new(&config.url, &config.key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> redis::RedisResult<MultiplexedConnection> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }
}

#[async_trait]
impl WorkQueue for RedisQueue {
    async fn send(&self, event: &AccountEvent) -> Result<()> {
        let body = serde_json::to_string(event)
            .map_err(|e| MastobanError::queue_send(format!("failed to serialize event: {}", e)))?;

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return Err(MastobanError::queue_send(e.to_string()));
            }
        };

        let result: redis::RedisResult<usize> = conn.lpush(&self.key, &body).await;
        match result {
            Ok(len) => {
                trace!("Enqueued message on '{}', queue length {}", self.key, len);
                Ok(())
            }
            Err(e) => {
                error!("Failed to enqueue message on '{}': {}", self.key, e);
                self.reset_connection().await;
                Err(MastobanError::queue_send(e.to_string()))
            }
        }
    }

    async fn receive_batch(&self, max: usize) -> Result<Vec<String>> {
        let Some(count) = NonZeroUsize::new(max) else {
            return Ok(Vec::new());
        };

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return Err(e.into());
            }
        };

        // 队列不存在时 RPOP 返回 nil
        let result: redis::RedisResult<Option<Vec<String>>> =
            conn.rpop(&self.key, Some(count)).await;
        match result {
            Ok(messages) => {
                let messages = messages.unwrap_or_default();
                trace!("Received {} message(s) from '{}'", messages.len(), self.key);
                Ok(messages)
            }
            Err(e) => {
                error!("Failed to receive from '{}': {}", self.key, e);
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
