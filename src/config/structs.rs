use serde::{Deserialize, Serialize};

/// 应用配置（启动时加载一次，校验后按引用传入各组件）
///
/// 包含：
/// - server: HTTP 监听地址
/// - geoip: MaxMind 数据库路径
/// - mastodon: 实例地址、访问令牌、封禁策略
/// - webhook: 预共享密钥与鉴权行为
/// - queue: 异步队列（Redis list）
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub geoip: GeoIpConfig,
    #[serde(default)]
    pub mastodon: MastodonConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// GeoIP 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeoIpConfig {
    /// MaxMind 数据库文件路径，未配置时使用工作目录下的 GeoLite2-Country.mmdb
    #[serde(default)]
    pub database_path: Option<String>,
}

/// Mastodon 实例与封禁策略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MastodonConfig {
    /// 实例地址，例如 https://mastodon.social
    #[serde(default)]
    pub instance_url: String,
    #[serde(default)]
    pub access_token: String,
    /// 封禁通知文本
    #[serde(default = "default_suspend_text")]
    pub suspend_text: String,
    /// none / sensitive / disable / silence / suspend
    #[serde(default)]
    pub suspend_level: String,
    /// 不做处理的国家代码（ISO 3166-1 alpha-2）
    #[serde(default = "default_home_country")]
    pub home_country: String,
}

/// Webhook 入口配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebhookConfig {
    /// 预共享密钥，通过 `?psk=` 传入
    #[serde(default)]
    pub psk: String,
    /// 为 true 时鉴权失败返回 401，否则保持 200 + 错误体
    #[serde(default)]
    pub strict_auth: bool,
}

/// 队列配置（Redis list）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Redis 连接地址；为空表示不启用转发入口
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_queue_key")]
    pub key: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    2
}

fn default_suspend_text() -> String {
    "This account is suspended pending further review.".to_string()
}

fn default_home_country() -> String {
    "US".to_string()
}

fn default_queue_key() -> String {
    "mastoban:accounts".to_string()
}

fn default_batch_size() -> usize {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
        }
    }
}

impl Default for MastodonConfig {
    fn default() -> Self {
        Self {
            instance_url: String::new(),
            access_token: String::new(),
            suspend_text: default_suspend_text(),
            suspend_level: String::new(),
            home_country: default_home_country(),
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: default_queue_key(),
            batch_size: default_batch_size(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
