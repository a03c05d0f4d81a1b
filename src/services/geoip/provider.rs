//! GeoIP 查询抽象层
//!
//! 路由只依赖 `GeoIpLookup`，生产环境使用 MaxMind 本地库，
//! 测试中可替换为固定表实现。

use std::net::IpAddr;

use serde::Serialize;

use crate::errors::Result;

/// 单次查询结果，不缓存，用完即弃
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoRecord {
    pub ip: IpAddr,
    /// 大洲代码 (e.g., "NA", "EU")
    #[serde(rename = "continent_code")]
    pub continent: String,
    /// ISO 3166-1 alpha-2 国家代码 (e.g., "US", "DE")
    #[serde(rename = "country_code")]
    pub country: String,
}

/// GeoIP 查询 trait
///
/// 实现必须支持无锁并发只读查询。
pub trait GeoIpLookup: Send + Sync {
    /// 查询 IP 地址所属的大洲与国家；库中没有该地址时返回错误
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}
