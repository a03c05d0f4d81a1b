use std::path::Path;

use super::AppConfig;
use crate::errors::Result;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "mastoban.toml";

/// 环境变量前缀（`MASTOBAN__MASTODON__ACCESS_TOKEN` 形式）
pub const ENV_PREFIX: &str = "MASTOBAN";

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：旧式平铺环境变量 > MASTOBAN__* > 配置文件 > 默认值
    /// 默认配置文件不存在时直接使用默认值；显式指定的文件必须存在。
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = Self::load_layered(path.unwrap_or(DEFAULT_CONFIG_FILE), path.is_some())?;
        config.override_with_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_layered(path: &str, required: bool) -> Result<Self> {
        Self::load_layered_with(path, required, Self::env_source())
    }

    /// MASTOBAN__* 环境变量源
    ///
    /// 不开启 try_parsing：psk、token 等必须按原样保留（"007123" 不能变成 7123），
    /// 数值和布尔字段由反序列化阶段从字符串转换。
    fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).separator("__")
    }

    fn load_layered_with(path: &str, required: bool, env: config::Environment) -> Result<Self> {
        use config::{Config, File};

        let settings = Config::builder()
            // 1. 从 TOML 文件加载
            .add_source(File::with_name(path).required(required))
            // 2. 从环境变量覆盖，前缀 MASTOBAN，分隔符 __
            .add_source(env)
            .build()?;

        if Path::new(path).exists() {
            tracing::debug!("Configuration loaded from: {}", path);
        }

        Ok(settings.try_deserialize::<AppConfig>()?)
    }

    /// 用旧式平铺环境变量覆盖配置
    ///
    /// `lookup` 一般是 `std::env::var`，测试中可替换为固定表。
    /// 空值视为未设置。
    pub fn override_with_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::error!("Invalid SERVER_PORT: {}", port),
            }
        }

        // 兼容历史上拼错的 GEOIP_DATABSE_PATH
        if let Some(path) = get("GEOIP_DATABASE_PATH").or_else(|| get("GEOIP_DATABSE_PATH")) {
            self.geoip.database_path = Some(path);
        }

        if let Some(token) = get("MASTODON_ACCESS_TOKEN") {
            self.mastodon.access_token = token;
        }
        if let Some(url) = get("MASTODON_INSTANCE_URL") {
            self.mastodon.instance_url = url;
        }
        if let Some(text) = get("MASTODON_SUSPEND_TEXT") {
            self.mastodon.suspend_text = text;
        }
        if let Some(level) = get("MASTODON_SUSPEND_LEVEL") {
            self.mastodon.suspend_level = level;
        }
        if let Some(country) = get("MASTODON_HOME_COUNTRY") {
            self.mastodon.home_country = country;
        }

        if let Some(psk) = get("PSK") {
            self.webhook.psk = psk;
        }
        if let Some(url) = get("QUEUE_URL") {
            self.queue.url = url;
        }
        if let Some(level) = get("LOGLEVEL") {
            self.logging.level = level;
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
