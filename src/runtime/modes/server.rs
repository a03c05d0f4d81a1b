//! Server mode
//!
//! 校验配置、装配组件并启动 HTTP 服务。

use actix_web::{App, HttpServer, middleware::DefaultHeaders, web};
use anyhow::Result;
use tracing::warn;

use crate::api::{HookState, configure};
use crate::config::AppConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &AppConfig) -> Result<()> {
    config.validate_server()?;

    let startup = lifetime::startup::prepare_server_startup(config).map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let state = web::Data::new(HookState {
        router: startup.router,
        secret: startup.secret,
        forwarder: startup.forwarder,
        strict_auth: config.webhook.strict_auth,
    });

    let workers = config.server.workers.clamp(1, 32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .configure(configure)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(workers)
    .bind(&bind_address)?;

    warn!(
        "Starting server at http://{} with {} worker(s)",
        bind_address, workers
    );

    // actix 自带 Ctrl+C 处理，收到信号后优雅退出
    server.run().await?;

    Ok(())
}
