//! Worker mode
//!
//! 循环从队列取批处理；队列为空时按 `poll_interval_ms` 休眠。
//! 取出的消息处理失败不会回到队列。

use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::errors;
use crate::runtime::lifetime;
use crate::services::{BatchReport, EventRouter, RedisQueue, WorkQueue};

/// 取一批消息并处理
pub async fn run_worker_once(
    router: &EventRouter,
    queue: &dyn WorkQueue,
    batch_size: usize,
) -> errors::Result<BatchReport> {
    let messages = queue.receive_batch(batch_size).await?;
    if messages.is_empty() {
        return Ok(BatchReport::default());
    }

    debug!("Pulled {} message(s) from {}", messages.len(), queue.name());
    Ok(router.process_batch(messages).await)
}

/// Run the queue worker until Ctrl+C
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_worker(config: &AppConfig) -> Result<()> {
    config.validate_worker()?;

    let router = lifetime::startup::build_router(config)?;
    let queue = RedisQueue::from_config(&config.queue)?;
    let batch_size = config.queue.batch_size;
    let interval = Duration::from_millis(config.queue.poll_interval_ms);

    // 只在批次之间响应关闭信号，避免丢弃已取出的消息
    let (stop_tx, mut stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        lifetime::shutdown::listen_for_shutdown().await;
        let _ = stop_tx.send(true);
    });

    info!(
        "Worker started: queue={} key={} batch_size={} poll_interval={:?}",
        queue.name(),
        queue.key(),
        batch_size,
        interval
    );

    while !*stop_rx.borrow() {
        let drained = match run_worker_once(&router, &queue, batch_size).await {
            Ok(report) => {
                if !report.suspended.is_empty() {
                    match serde_json::to_string(&report.to_output()) {
                        Ok(json) => info!(output = %json, "Batch suspended {} account(s)", report.suspended.len()),
                        Err(e) => error!("Failed to serialize batch output: {}", e),
                    }
                }
                report.processed() > 0
            }
            Err(e) => {
                error!(
                    err_ref = %errors::new_err_ref(),
                    code = e.code(),
                    "Failed to receive from queue: {}",
                    e
                );
                false
            }
        };

        // 本批处理了消息则立即拉下一批
        if drained {
            continue;
        }

        tokio::select! {
            _ = stop_rx.changed() => {}
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!("Worker stopped");
    Ok(())
}
