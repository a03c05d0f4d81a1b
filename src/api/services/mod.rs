pub mod health;
pub mod hook;

use actix_web::web;

pub use health::{HealthService, health_routes};
pub use hook::{HookService, HookState, PskQuery, hook_routes};

/// 注册全部路由；`HookState` 需要由调用方通过 `app_data` 注入
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_routes()).configure(hook_routes);
}
