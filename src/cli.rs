//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// mastoban - suspends new Mastodon accounts that sign up from outside the home country
#[derive(Parser, Debug)]
#[command(name = "mastoban")]
#[command(version)]
#[command(about = "Geo-IP based moderation for new Mastodon accounts", long_about = None)]
pub struct Cli {
    /// Configuration file (default: mastoban.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Log level / filter directive (e.g. debug, info, mastoban=trace)
    #[arg(long, global = true, env = "LOGLEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Drain the work queue
    Worker,

    /// Look up the continent and country of an IP address
    Lookup {
        /// IP address (v4 or v6)
        #[arg(long)]
        ip: String,

        /// MaxMind database file (default: geoip.database_path or GeoLite2-Country.mmdb)
        #[arg(long, env = "DBFILE")]
        dbfile: Option<String>,

        /// Country treated as home (default: mastodon.home_country)
        #[arg(long)]
        home_country: Option<String>,
    },

    /// Apply an admin action to one account
    Suspend {
        /// Account id
        #[arg(long)]
        id: String,

        /// Instance URL (default: mastodon.instance_url)
        #[arg(long)]
        instance: Option<String>,

        /// Admin access token (default: mastodon.access_token)
        #[arg(long)]
        token: Option<String>,

        /// Action type: none, sensitive, disable, silence, suspend (default: mastodon.suspend_level)
        #[arg(long)]
        level: Option<String>,

        /// Notice sent to the user (default: mastodon.suspend_text)
        #[arg(long)]
        text: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: mastoban.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
