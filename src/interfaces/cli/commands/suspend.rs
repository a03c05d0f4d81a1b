//! Suspend command

use colored::Colorize;

use crate::errors::Result;
use crate::services::MastodonClient;

/// 对单个账号执行管理动作
pub async fn suspend_account(
    id: &str,
    instance: &str,
    token: &str,
    level: &str,
    text: &str,
) -> Result<()> {
    let client = MastodonClient::new(instance, token)?;

    println!(
        "{} {} {} {}",
        "Applying".yellow(),
        level.trim().to_ascii_lowercase().bold(),
        "to account".yellow(),
        id.cyan()
    );

    client.suspend_account(id, level, text).await?;

    println!(
        "  {} {}",
        "Action applied on".green(),
        client.instance().blue()
    );
    Ok(())
}
