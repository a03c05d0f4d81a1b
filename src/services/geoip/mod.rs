//! GeoIP 服务模块
//!
//! 提供 IP 地址地理位置查询功能：本地 MaxMind 数据库，单次点查，不缓存。

mod maxmind;
mod provider;

pub use maxmind::{DEFAULT_DATABASE_FILE, MaxMindLocator, resolve_database_path};
pub use provider::{GeoIpLookup, GeoRecord};
