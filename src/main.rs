use clap::Parser;
use tracing::debug;

use mastoban::cli::{Cli, Commands};
use mastoban::config::AppConfig;
use mastoban::errors::MastobanError;
use mastoban::runtime::modes;
use mastoban::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    // 生成配置不需要加载现有配置
    if let Commands::Config { action } = command {
        exit_on_error(modes::run_config_command(action).await);
        return Ok(());
    }

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    let _guard = init_logging(&config.logging)?;
    debug!("Configuration loaded");

    match command {
        Commands::Serve => modes::run_server(&config).await,
        Commands::Worker => modes::run_worker(&config).await,
        other => {
            exit_on_error(modes::run_cli(other, &config).await);
            Ok(())
        }
    }
}

fn exit_on_error(result: Result<(), MastobanError>) {
    if let Err(e) = result {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
