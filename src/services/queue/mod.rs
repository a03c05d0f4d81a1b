//! 工作队列
//!
//! webhook 入口只负责入队，worker 按批取出后交给 `EventRouter`。

mod redis;

use async_trait::async_trait;

use crate::errors::Result;
use crate::structs::AccountEvent;

pub use self::redis::RedisQueue;

/// 工作队列接口
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// 序列化事件并入队
    async fn send(&self, event: &AccountEvent) -> Result<()>;

    /// 按入队顺序取出最多 `max` 条消息；队列为空时返回空 Vec
    ///
    /// 取出即删除，处理失败的消息不会回到队列。
    async fn receive_batch(&self, max: usize) -> Result<Vec<String>>;

    fn name(&self) -> &'static str;
}
