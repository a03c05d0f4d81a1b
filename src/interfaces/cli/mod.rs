//! CLI interface module

pub mod commands;

use crate::cli::{Commands, ConfigCommands};
use crate::config::AppConfig;
use crate::errors::{MastobanError, Result};
use commands::{config_generate, lookup_ip, suspend_account};

/// Run a CLI command from clap-parsed input
///
/// `serve` / `worker` 由 runtime 处理，不会进入这里。
pub async fn run_cli_command(cmd: Commands, config: &AppConfig) -> Result<()> {
    match cmd {
        Commands::Lookup {
            ip,
            dbfile,
            home_country,
        } => {
            let dbfile = dbfile.or_else(|| config.geoip.database_path.clone());
            let home = home_country.unwrap_or_else(|| config.mastodon.home_country_code());
            lookup_ip(&ip, dbfile.as_deref(), &home)
        }

        Commands::Suspend {
            id,
            instance,
            token,
            level,
            text,
        } => {
            let mastodon = &config.mastodon;
            suspend_account(
                &id,
                instance.as_deref().unwrap_or(&mastodon.instance_url),
                token.as_deref().unwrap_or(&mastodon.access_token),
                level.as_deref().unwrap_or(&mastodon.suspend_level),
                text.as_deref().unwrap_or(&mastodon.suspend_text),
            )
            .await
        }

        Commands::Config { action } => run_config_command(action).await,

        Commands::Serve | Commands::Worker => Err(MastobanError::invalid_config(
            "serve and worker are not one-shot commands",
        )),
    }
}

/// 配置相关命令，不需要加载现有配置
pub async fn run_config_command(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Generate { output_path, force } => config_generate(output_path, force),
    }
}
