//! Webhook 入口
//!
//! - `POST /hook`：同步处理单个事件，立即返回处理结果
//! - `POST /webhook`：校验后入队，由 worker 异步处理
//!
//! 两个入口总是返回 JSON `Output`。默认鉴权失败也返回 200 + 错误体，
//! 开启 `webhook.strict_auth` 后改为 401，body 不变。

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{error, trace};

use crate::errors::{MastobanError, Result, new_err_ref};
use crate::services::{EventRouter, QueueForwarder, SharedSecret};
use crate::structs::Output;

/// 请求参数 `?psk=`
#[derive(Debug, Default, Deserialize)]
pub struct PskQuery {
    pub psk: Option<String>,
}

/// 两个入口共享的状态
pub struct HookState {
    pub router: EventRouter,
    pub secret: SharedSecret,
    pub forwarder: QueueForwarder,
    pub strict_auth: bool,
}

pub struct HookService;

impl HookService {
    /// 同步处理
    pub async fn handle_hook(
        req: HttpRequest,
        body: web::Bytes,
        state: web::Data<HookState>,
    ) -> HttpResponse {
        trace!("Received /hook request ({} bytes)", body.len());

        let psk = Self::psk_param(&req);
        match Self::process_hook(&state, psk.as_deref(), &body).await {
            Ok(output) => Self::respond(StatusCode::OK, &output),
            Err(e) => Self::failure(&state, "hook", &e),
        }
    }

    /// 转发到队列
    pub async fn handle_webhook(
        req: HttpRequest,
        body: web::Bytes,
        state: web::Data<HookState>,
    ) -> HttpResponse {
        trace!("Received /webhook request ({} bytes)", body.len());

        let psk = Self::psk_param(&req);
        match Self::process_webhook(&state, psk.as_deref(), &body).await {
            Ok(output) => Self::respond(StatusCode::OK, &output),
            Err(e) => Self::failure(&state, "webhook", &e),
        }
    }

    async fn process_hook(state: &HookState, psk: Option<&str>, body: &[u8]) -> Result<Output> {
        state.secret.verify(psk)?;
        let raw = Self::body_as_str(body)?;
        let assessment = state.router.handle_raw(raw).await?;
        Ok(assessment.to_output())
    }

    async fn process_webhook(
        state: &HookState,
        psk: Option<&str>,
        body: &[u8],
    ) -> Result<Output> {
        match Self::body_as_str(body) {
            Ok(raw) => state.forwarder.accept(raw, psk).await,
            Err(e) => {
                // psk 先于 body 校验
                state.secret.verify(psk)?;
                Err(e)
            }
        }
    }

    /// 读取 `?psk=`；查询串无法解析时视为未提供
    fn psk_param(req: &HttpRequest) -> Option<String> {
        web::Query::<PskQuery>::from_query(req.query_string())
            .map(|q| q.into_inner().psk)
            .unwrap_or_default()
    }

    fn body_as_str(body: &[u8]) -> Result<&str> {
        std::str::from_utf8(body).map_err(|e| MastobanError::parse(format!("body is not UTF-8: {}", e)))
    }

    /// 生成 err_ref、记录日志并转换为错误响应
    fn failure(state: &HookState, route: &str, err: &MastobanError) -> HttpResponse {
        let err_ref = new_err_ref();
        error!(
            err_ref = %err_ref,
            code = err.code(),
            route,
            "{}",
            err.format_simple()
        );

        let status = if state.strict_auth && err.is_auth() {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::OK
        };
        Self::respond(status, &Output::failure(err, err_ref))
    }

    fn respond(status: StatusCode, output: &Output) -> HttpResponse {
        HttpResponse::build(status)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(output)
    }
}

/// Webhook 路由配置
pub fn hook_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/hook", web::post().to(HookService::handle_hook))
        .route("/webhook", web::post().to(HookService::handle_webhook));
}
