//! Mastodon 管理动作

mod client;
mod level;

pub use client::{AccountModerator, MastodonClient};
pub use level::{SuspendLevel, SuspendRequest};
