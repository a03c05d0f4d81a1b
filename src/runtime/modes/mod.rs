//! Mode routing
//!
//! - Server mode：HTTP 入口（`/hook`、`/webhook`、health）
//! - Worker mode：从队列按批取出事件处理
//! - CLI mode：一次性的 lookup / suspend / config 命令

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub mod worker;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "server")]
pub use worker::{run_worker, run_worker_once};

#[cfg(feature = "cli")]
pub use cli::{run_cli, run_config_command};
