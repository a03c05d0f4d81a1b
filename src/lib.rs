//! mastoban - geo-IP based moderation for new Mastodon accounts
//!
//! 收到 `account.created` 事件后查询注册 IP 所在国家，
//! 不在本国的账号通过 Admin API 自动处置。
//!
//! # Features
//! - **server**: HTTP 入口与队列 worker (default)
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `services`: GeoIP 查询、Mastodon 客户端、事件路由、队列与转发
//! - `api`: HTTP handlers
//! - `interfaces`: CLI 命令
//! - `config`: Configuration management
//! - `runtime`: 启动装配与运行模式
//! - `system`: 日志

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod structs;
pub mod system;
