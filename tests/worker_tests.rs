//! 队列 worker 测试

mod common;

use std::sync::Arc;

use common::*;
use mastoban::errors::MastobanError;
use mastoban::runtime::modes::run_worker_once;
use mastoban::services::{QueueForwarder, SharedSecret, WorkQueue};

#[tokio::test]
async fn test_run_once_drains_at_most_batch_size_in_order() {
    let moderator = Arc::new(RecordingModerator::new());
    let router = router_with(moderator.clone());
    let queue = MemoryQueue::new();
    for id in ["1", "2", "3"] {
        queue.push_raw(&account_event(id, &format!("user{id}"), DE_IP));
    }

    let report = run_worker_once(&router, &queue, 2).await.unwrap();
    let ids: Vec<&str> = report.suspended.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(queue.len(), 1);

    let report = run_worker_once(&router, &queue, 2).await.unwrap();
    assert_eq!(report.suspended.len(), 1);
    assert_eq!(report.suspended[0].id, "3");

    let report = run_worker_once(&router, &queue, 2).await.unwrap();
    assert_eq!(report.processed(), 0);
    assert_eq!(moderator.calls().len(), 3);
}

#[tokio::test]
async fn test_failed_messages_are_not_requeued() {
    let router = router_with(Arc::new(RecordingModerator::new()));
    let queue = MemoryQueue::new();
    queue.push_raw("not json");
    queue.push_raw(&account_event("1", "alice", US_IP));

    let report = run_worker_once(&router, &queue, 10).await.unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.allowed, 1);
    assert_eq!(queue.len(), 0);
}

#[tokio::test]
async fn test_receive_error_is_returned() {
    let router = router_with(Arc::new(RecordingModerator::new()));
    let queue = MemoryQueue::broken();

    let err = run_worker_once(&router, &queue, 10).await.unwrap_err();
    assert!(matches!(err, MastobanError::QueueUnavailable(_)));
}

#[tokio::test]
async fn test_forwarded_events_are_processed_by_worker() {
    let moderator = Arc::new(RecordingModerator::new());
    let router = router_with(moderator.clone());
    let queue = Arc::new(MemoryQueue::new());
    let forwarder = QueueForwarder::new(
        SharedSecret::new(PSK),
        Some(queue.clone() as Arc<dyn WorkQueue>),
    );

    forwarder
        .accept(&account_event("1", "alice", US_IP), Some(PSK))
        .await
        .unwrap();
    forwarder
        .accept(&account_event("2", "bob", DE_IP), Some(PSK))
        .await
        .unwrap();
    assert!(moderator.calls().is_empty());

    let report = run_worker_once(&router, queue.as_ref(), 10).await.unwrap();
    assert_eq!(report.allowed, 1);
    assert_eq!(report.suspended.len(), 1);
    assert_eq!(report.suspended[0].username, "bob");
    assert_eq!(moderator.calls().len(), 1);
}
