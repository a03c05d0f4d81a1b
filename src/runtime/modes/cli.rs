//! CLI mode

use crate::cli::{Commands, ConfigCommands};
use crate::config::AppConfig;
use crate::errors::Result;

/// Run a one-shot CLI command
pub async fn run_cli(cmd: Commands, config: &AppConfig) -> Result<()> {
    crate::interfaces::cli::run_cli_command(cmd, config).await
}

/// Run a configuration command (no configuration is loaded)
pub async fn run_config_command(action: ConfigCommands) -> Result<()> {
    crate::interfaces::cli::run_config_command(action).await
}
