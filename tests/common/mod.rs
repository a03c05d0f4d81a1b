//! 集成测试共用的替身实现
//!
//! - `TableLocator`：固定表 GeoIP
//! - `RecordingModerator`：记录调用、可配置失败的处置实现
//! - `MemoryQueue`：内存 FIFO 队列
//! - `spawn_mock_admin`：本地 actix-web 服务充当 Mastodon Admin API

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use async_trait::async_trait;

use mastoban::api::HookState;
use mastoban::errors::{MastobanError, Result};
use mastoban::services::{
    AccountModerator, EventRouter, GeoIpLookup, GeoRecord, QueueForwarder, SharedSecret,
    SuspendLevel, SuspendPolicy, SuspendRequest, WorkQueue,
};
use mastoban::structs::AccountEvent;

pub const PSK: &str = "correct-horse-battery-staple";
pub const US_IP: &str = "73.207.229.36";
pub const DE_IP: &str = "2a01:4f8::1";
pub const UNKNOWN_IP: &str = "10.0.0.1";

// =============================================================================
// GeoIP
// =============================================================================

pub struct TableLocator {
    entries: HashMap<IpAddr, (String, String)>,
}

impl TableLocator {
    pub fn new(entries: &[(&str, &str, &str)]) -> Self {
        let entries = entries
            .iter()
            .map(|(ip, continent, country)| {
                (
                    ip.parse().expect("valid test IP"),
                    (continent.to_string(), country.to_string()),
                )
            })
            .collect();
        Self { entries }
    }

    /// US 与 DE 各一条
    pub fn standard() -> Self {
        Self::new(&[(US_IP, "NA", "US"), (DE_IP, "EU", "DE")])
    }
}

impl GeoIpLookup for TableLocator {
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord> {
        let (continent, country) = self
            .entries
            .get(&ip)
            .ok_or_else(|| MastobanError::geo_lookup(format!("no entry for {}", ip)))?;
        Ok(GeoRecord {
            ip,
            continent: continent.clone(),
            country: country.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "table"
    }
}

// =============================================================================
// Moderator
// =============================================================================

#[derive(Default)]
pub struct RecordingModerator {
    calls: Mutex<Vec<SuspendRequest>>,
    failure: Option<MastobanError>,
}

impl RecordingModerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: MastobanError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(err),
        }
    }

    pub fn calls(&self) -> Vec<SuspendRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountModerator for RecordingModerator {
    async fn suspend(&self, request: &SuspendRequest) -> Result<()> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Queue
// =============================================================================

#[derive(Default)]
pub struct MemoryQueue {
    items: Mutex<VecDeque<String>>,
    broken: bool,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有操作都失败
    pub fn broken() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            broken: true,
        }
    }

    pub fn push_raw(&self, raw: &str) {
        self.items.lock().unwrap().push_back(raw.to_string());
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.items.lock().unwrap().iter().cloned().collect()
    }
}

#[async_trait]
impl WorkQueue for MemoryQueue {
    async fn send(&self, event: &AccountEvent) -> Result<()> {
        if self.broken {
            return Err(MastobanError::queue_send("queue is broken"));
        }
        let body = serde_json::to_string(event)?;
        self.items.lock().unwrap().push_back(body);
        Ok(())
    }

    async fn receive_batch(&self, max: usize) -> Result<Vec<String>> {
        if self.broken {
            return Err(MastobanError::queue_unavailable("queue is broken"));
        }
        let mut items = self.items.lock().unwrap();
        let n = max.min(items.len());
        Ok(items.drain(..n).collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn account_event(id: &str, username: &str, ip: &str) -> String {
    serde_json::json!({
        "event": "account.created",
        "created_at": "2023-01-04T01:57:03.708Z",
        "object": {
            "id": id,
            "username": username,
            "domain": null,
            "created_at": "2023-01-04T01:57:03.566Z",
            "email": format!("{}@example.org", username),
            "ip": ip,
        }
    })
    .to_string()
}

pub fn policy() -> SuspendPolicy {
    SuspendPolicy::new("US", SuspendLevel::Suspend, "bye")
}

pub fn router_with(moderator: Arc<RecordingModerator>) -> EventRouter {
    EventRouter::new(Arc::new(TableLocator::standard()), moderator, policy())
}

pub fn hook_state(
    moderator: Arc<RecordingModerator>,
    queue: Option<Arc<MemoryQueue>>,
    strict_auth: bool,
) -> web::Data<HookState> {
    let secret = SharedSecret::new(PSK);
    let queue = queue.map(|q| q as Arc<dyn WorkQueue>);
    web::Data::new(HookState {
        router: router_with(moderator),
        secret: secret.clone(),
        forwarder: QueueForwarder::new(secret, queue),
        strict_auth,
    })
}

// =============================================================================
// Mock Mastodon Admin API
// =============================================================================

#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub account_id: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub form: HashMap<String, String>,
}

struct MockState {
    calls: Arc<Mutex<Vec<CapturedCall>>>,
    status: u16,
    body: &'static str,
}

pub struct MockAdmin {
    pub base_url: String,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

impl MockAdmin {
    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn mock_action(
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
    state: web::Data<MockState>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.calls.lock().unwrap().push(CapturedCall {
        account_id: path.into_inner(),
        authorization: header("Authorization"),
        content_type: header("Content-Type"),
        form: form.into_inner(),
    });

    HttpResponse::build(StatusCode::from_u16(state.status).unwrap()).body(state.body)
}

/// 启动一个只实现 action 端点的本地服务，返回其地址
///
/// 必须在 actix 运行时中调用（`#[actix_web::test]`）。
pub async fn spawn_mock_admin(status: u16, body: &'static str) -> MockAdmin {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = web::Data::new(MockState {
        calls: calls.clone(),
        status,
        body,
    });

    let server = HttpServer::new(move || {
        App::new().app_data(state.clone()).route(
            "/api/v1/admin/accounts/{id}/action",
            web::post().to(mock_action),
        )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind mock admin");

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    MockAdmin {
        base_url: format!("http://{}", addr),
        calls,
    }
}
