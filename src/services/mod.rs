//! Service layer for business logic
//!
//! HTTP 入口、队列 worker 与 CLI 共用的业务逻辑。

pub mod auth;
pub mod forwarder;
pub mod geoip;
pub mod mastodon;
pub mod queue;
pub mod router;

pub use auth::SharedSecret;
pub use forwarder::QueueForwarder;
pub use geoip::{GeoIpLookup, GeoRecord, MaxMindLocator};
pub use mastodon::{AccountModerator, MastodonClient, SuspendLevel, SuspendRequest};
pub use queue::{RedisQueue, WorkQueue};
pub use router::{Assessment, BatchReport, EventRouter, SuspendPolicy, Verdict};
