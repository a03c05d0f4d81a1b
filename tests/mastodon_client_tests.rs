//! MastodonClient 针对本地 Admin API 的测试

mod common;

use common::spawn_mock_admin;
use mastoban::errors::MastobanError;
use mastoban::services::{AccountModerator, MastodonClient, SuspendLevel, SuspendRequest};

#[actix_web::test]
async fn test_suspend_success() {
    let admin = spawn_mock_admin(200, "{}").await;
    let client = MastodonClient::new(&format!("{}/", admin.base_url), "admintoken").unwrap();

    client
        .suspend_account("42", "Suspend", "Your account is under review")
        .await
        .unwrap();

    let calls = admin.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.account_id, "42");
    assert_eq!(call.authorization.as_deref(), Some("Bearer admintoken"));
    assert!(
        call.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
    );
    assert_eq!(call.form.get("type").map(String::as_str), Some("suspend"));
    assert_eq!(
        call.form.get("text").map(String::as_str),
        Some("Your account is under review")
    );
    assert_eq!(
        call.form.get("send_email_notification").map(String::as_str),
        Some("true")
    );
}

#[actix_web::test]
async fn test_non_200_is_remote_action_failed() {
    let admin = spawn_mock_admin(403, "This action is not allowed").await;
    let client = MastodonClient::new(&admin.base_url, "admintoken").unwrap();

    let err = client
        .suspend_account("42", "suspend", "bye")
        .await
        .unwrap_err();

    match err {
        MastobanError::RemoteActionFailed { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "This action is not allowed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(admin.calls().len(), 1);
}

#[actix_web::test]
async fn test_other_2xx_is_not_success() {
    let admin = spawn_mock_admin(204, "").await;
    let client = MastodonClient::new(&admin.base_url, "admintoken").unwrap();

    let err = client.suspend_account("42", "suspend", "bye").await.unwrap_err();
    assert!(matches!(err, MastobanError::RemoteActionFailed { status: 204, .. }));
}

#[actix_web::test]
async fn test_invalid_level_sends_nothing() {
    let admin = spawn_mock_admin(200, "{}").await;
    let client = MastodonClient::new(&admin.base_url, "admintoken").unwrap();

    let err = client
        .suspend_account("42", "obliterate", "bye")
        .await
        .unwrap_err();
    assert!(matches!(err, MastobanError::InvalidSuspendLevel(_)));
    assert!(admin.calls().is_empty());
}

#[actix_web::test]
async fn test_not_idempotent() {
    let admin = spawn_mock_admin(200, "{}").await;
    let client = MastodonClient::new(&admin.base_url, "admintoken").unwrap();
    let request = SuspendRequest::new("7", SuspendLevel::Disable, "bye");

    client.suspend(&request).await.unwrap();
    client.suspend(&request).await.unwrap();

    let calls = admin.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.form.get("type").map(String::as_str) == Some("disable")));
}

#[actix_web::test]
async fn test_transport_failure() {
    // 绑定后立即释放端口，连接会被拒绝
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = MastodonClient::new(&format!("http://127.0.0.1:{}", port), "t").unwrap();

    let err = client.suspend_account("1", "suspend", "bye").await.unwrap_err();
    assert!(matches!(err, MastobanError::Transport(_)));
    assert_eq!(err.public_message(), "failed to suspend user");
}
