//! MaxMind GeoLite2 数据库实现
//!
//! 使用本地 GeoLite2-Country.mmdb（或 City 库）进行 IP 地理位置查询

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use maxminddb::{Reader, geoip2};
use tracing::{info, trace};

use super::provider::{GeoIpLookup, GeoRecord};
use crate::errors::{MastobanError, Result};

/// 未配置路径时使用的数据库文件
pub const DEFAULT_DATABASE_FILE: &str = "GeoLite2-Country.mmdb";

/// MaxMind GeoIP Provider
///
/// `Reader` 只读且 `Sync`，进程内打开一次即可在多个请求间共享。
pub struct MaxMindLocator {
    reader: Reader<Vec<u8>>,
    path: PathBuf,
}

impl MaxMindLocator {
    /// 打开数据库
    ///
    /// 路径为空或未提供时使用 [`DEFAULT_DATABASE_FILE`]，
    /// 相对路径按当前工作目录解析为绝对路径。
    pub fn open(path: Option<&str>) -> Result<Self> {
        let path = resolve_database_path(path)?;

        let reader = Reader::open_readfile(&path).map_err(|e| {
            MastobanError::database_open(format!(
                "failed to open GeoIP database '{}': {}",
                path.display(),
                e
            ))
        })?;

        info!(
            "GeoIP: Opened MaxMind database at {} ({})",
            path.display(),
            reader.metadata.database_type
        );
        Ok(Self { reader, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 解析数据库绝对路径
pub fn resolve_database_path(path: Option<&str>) -> Result<PathBuf> {
    let raw = match path.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => DEFAULT_DATABASE_FILE,
    };

    std::path::absolute(raw).map_err(|e| {
        MastobanError::database_open(format!(
            "failed to resolve GeoIP database path '{}': {}",
            raw, e
        ))
    })
}

impl GeoIpLookup for MaxMindLocator {
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord> {
        let result = self
            .reader
            .lookup(ip)
            .map_err(|e| MastobanError::geo_lookup(format!("lookup of {} failed: {}", ip, e)))?;

        // Country 结构同样适用于 City 库（字段是其子集）
        let record: geoip2::Country = result
            .decode()
            .map_err(|e| {
                MastobanError::geo_lookup(format!("failed to decode record for {}: {}", ip, e))
            })?
            .ok_or_else(|| MastobanError::geo_lookup(format!("no entry for {}", ip)))?;

        let continent = record.continent.code.unwrap_or_default().to_string();
        let country = record.country.iso_code.unwrap_or_default().to_string();

        trace!(
            "MaxMind lookup for {}: continent={}, country={}",
            ip, continent, country
        );

        Ok(GeoRecord {
            ip,
            continent,
            country,
        })
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}
