//! Health endpoints
//!
//! `/health` reports overall status, `/health/live` is a trivial liveness
//! probe, `/health/ready` checks database connectivity.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::warn;

use crate::storage::GameStore;

/// 程序启动时间（用于 uptime 上报）
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}

/// 注册 /health 路由
pub fn health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/live", web::get().to(liveness_check))
            .route("/ready", web::get().to(readiness_check)),
    );
}

pub async fn health_check(
    store: web::Data<Arc<GameStore>>,
    start_time: web::Data<AppStartTime>,
) -> ActixResult<impl Responder> {
    let uptime = Utc::now() - start_time.start_datetime;
    let database = match store.ping().await {
        Ok(()) => "up",
        Err(e) => {
            warn!("Health check: database unreachable - {}", e);
            "down"
        }
    };

    let status = if database == "up" { "ok" } else { "degraded" };
    let http_status = if database == "up" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok(HttpResponse::build(http_status).json(json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": uptime.num_seconds(),
        "database": database,
    })))
}

pub async fn liveness_check() -> ActixResult<impl Responder> {
    Ok(HttpResponse::Ok().json(json!({ "status": "alive" })))
}

pub async fn readiness_check(store: web::Data<Arc<GameStore>>) -> ActixResult<impl Responder> {
    match store.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "status": "ready" }))),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(json!({ "status": "not ready" })))
        }
    }
}
