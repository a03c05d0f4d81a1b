use std::fmt;

#[derive(Debug, Clone)]
pub enum MastobanError {
    ConfigMissing(String),
    InvalidConfig(String),
    Auth(String),
    Parse(String),
    UnsupportedEventType(String),
    InvalidIp(String),
    DatabaseOpen(String),
    GeoLookup(String),
    InvalidSuspendLevel(String),
    MissingInstance,
    MissingAccessToken,
    RemoteActionFailed { status: u16, body: String },
    Transport(String),
    SuspendFailed(Box<MastobanError>),
    QueueSendFailed(String),
    QueueUnavailable(String),
}

impl MastobanError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            MastobanError::ConfigMissing(_) => "E001",
            MastobanError::InvalidConfig(_) => "E002",
            MastobanError::Auth(_) => "E003",
            MastobanError::Parse(_) => "E004",
            MastobanError::UnsupportedEventType(_) => "E005",
            MastobanError::InvalidIp(_) => "E006",
            MastobanError::DatabaseOpen(_) => "E007",
            MastobanError::GeoLookup(_) => "E008",
            MastobanError::InvalidSuspendLevel(_) => "E009",
            MastobanError::MissingInstance => "E010",
            MastobanError::MissingAccessToken => "E011",
            MastobanError::RemoteActionFailed { .. } => "E012",
            MastobanError::Transport(_) => "E013",
            MastobanError::SuspendFailed(_) => "E014",
            MastobanError::QueueSendFailed(_) => "E015",
            MastobanError::QueueUnavailable(_) => "E016",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            MastobanError::ConfigMissing(_) => "Missing Configuration",
            MastobanError::InvalidConfig(_) => "Invalid Configuration",
            MastobanError::Auth(_) => "Authentication Error",
            MastobanError::Parse(_) => "Payload Parse Error",
            MastobanError::UnsupportedEventType(_) => "Unsupported Event Type",
            MastobanError::InvalidIp(_) => "Invalid IP Address",
            MastobanError::DatabaseOpen(_) => "GeoIP Database Open Error",
            MastobanError::GeoLookup(_) => "GeoIP Lookup Error",
            MastobanError::InvalidSuspendLevel(_) => "Invalid Suspend Level",
            MastobanError::MissingInstance => "Missing Instance",
            MastobanError::MissingAccessToken => "Missing Access Token",
            MastobanError::RemoteActionFailed { .. } => "Remote Action Failed",
            MastobanError::Transport(_) => "HTTP Transport Error",
            MastobanError::SuspendFailed(_) => "Suspend Failed",
            MastobanError::QueueSendFailed(_) => "Queue Send Error",
            MastobanError::QueueUnavailable(_) => "Queue Unavailable",
        }
    }

    /// 获取错误详情（用于日志）
    pub fn detail(&self) -> String {
        match self {
            MastobanError::ConfigMissing(msg)
            | MastobanError::InvalidConfig(msg)
            | MastobanError::Auth(msg)
            | MastobanError::Parse(msg)
            | MastobanError::UnsupportedEventType(msg)
            | MastobanError::InvalidIp(msg)
            | MastobanError::DatabaseOpen(msg)
            | MastobanError::GeoLookup(msg)
            | MastobanError::InvalidSuspendLevel(msg)
            | MastobanError::Transport(msg)
            | MastobanError::QueueSendFailed(msg)
            | MastobanError::QueueUnavailable(msg) => msg.clone(),
            MastobanError::MissingInstance => "no instance URL configured".to_string(),
            MastobanError::MissingAccessToken => "no access token configured".to_string(),
            MastobanError::RemoteActionFailed { status, body } => {
                format!("HTTP {}: {}", status, body)
            }
            MastobanError::SuspendFailed(inner) => inner.format_simple(),
        }
    }

    /// 返回给调用方的稳定错误文案（写入 `Output.error.msg`）
    ///
    /// 内部细节只进日志，不暴露给 webhook 调用方。
    pub fn public_message(&self) -> String {
        match self {
            MastobanError::ConfigMissing(name) => format!("missing required setting: {}", name),
            MastobanError::InvalidConfig(_) => "invalid configuration".to_string(),
            MastobanError::Auth(msg) => msg.clone(),
            MastobanError::Parse(_) => "unable to unmarshal request".to_string(),
            MastobanError::UnsupportedEventType(_) => "message event not supported".to_string(),
            MastobanError::InvalidIp(_) => "unable to parse IP address".to_string(),
            MastobanError::DatabaseOpen(_) => "unable to create GeoIP instance".to_string(),
            MastobanError::GeoLookup(_) => "unable to lookup IP in GeoIP database".to_string(),
            MastobanError::MissingInstance | MastobanError::MissingAccessToken => {
                "unable to create mastoclient instance".to_string()
            }
            MastobanError::InvalidSuspendLevel(_)
            | MastobanError::RemoteActionFailed { .. }
            | MastobanError::Transport(_)
            | MastobanError::SuspendFailed(_) => "failed to suspend user".to_string(),
            MastobanError::QueueSendFailed(_) => "unable to send message to queue".to_string(),
            MastobanError::QueueUnavailable(_) => "unable to create queue instance".to_string(),
        }
    }

    /// 是否为鉴权失败（strict_auth 模式下映射为 401）
    pub fn is_auth(&self) -> bool {
        matches!(self, MastobanError::Auth(_))
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.detail().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.detail())
    }
}

impl fmt::Display for MastobanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for MastobanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MastobanError::SuspendFailed(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

// 便捷的构造函数
impl MastobanError {
    pub fn config_missing<T: Into<String>>(name: T) -> Self {
        MastobanError::ConfigMissing(name.into())
    }

    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        MastobanError::InvalidConfig(msg.into())
    }

    pub fn auth<T: Into<String>>(msg: T) -> Self {
        MastobanError::Auth(msg.into())
    }

    pub fn parse<T: Into<String>>(msg: T) -> Self {
        MastobanError::Parse(msg.into())
    }

    pub fn invalid_ip<T: Into<String>>(msg: T) -> Self {
        MastobanError::InvalidIp(msg.into())
    }

    pub fn database_open<T: Into<String>>(msg: T) -> Self {
        MastobanError::DatabaseOpen(msg.into())
    }

    pub fn geo_lookup<T: Into<String>>(msg: T) -> Self {
        MastobanError::GeoLookup(msg.into())
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        MastobanError::Transport(msg.into())
    }

    pub fn queue_send<T: Into<String>>(msg: T) -> Self {
        MastobanError::QueueSendFailed(msg.into())
    }

    pub fn queue_unavailable<T: Into<String>>(msg: T) -> Self {
        MastobanError::QueueUnavailable(msg.into())
    }

    pub fn suspend_failed(inner: MastobanError) -> Self {
        MastobanError::SuspendFailed(Box::new(inner))
    }
}

/// 生成一次性错误关联 ID（仅用于日志关联）
pub fn new_err_ref() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl From<serde_json::Error> for MastobanError {
    fn from(err: serde_json::Error) -> Self {
        MastobanError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for MastobanError {
    fn from(err: std::io::Error) -> Self {
        MastobanError::InvalidConfig(err.to_string())
    }
}

impl From<config::ConfigError> for MastobanError {
    fn from(err: config::ConfigError) -> Self {
        MastobanError::InvalidConfig(err.to_string())
    }
}

impl From<redis::RedisError> for MastobanError {
    fn from(err: redis::RedisError) -> Self {
        MastobanError::QueueUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MastobanError>;
