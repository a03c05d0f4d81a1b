//! HTTP 入口

pub mod services;

pub use services::{HookService, HookState, configure};
