//! Application lifecycle: startup preparation and the server loop

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use crate::api::services::{AppStartTime, game_routes, health_routes, review_routes};
use crate::config::AppConfig;
use crate::storage::GameStore;

pub struct StartupContext {
    pub store: Arc<GameStore>,
    pub start_time: AppStartTime,
}

/// 准备服务器启动的上下文：存储连接 + 迁移
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    debug!("Starting pre-startup processing...");

    let store = Arc::new(
        GameStore::new(&config.database.database_url, &config.database.backend)
            .await
            .context("Failed to create game store")?,
    );
    info!("Using database backend: {}", store.backend_name());

    Ok(StartupContext {
        store,
        start_time: AppStartTime {
            start_datetime: Utc::now(),
        },
    })
}

/// Run the HTTP server until shutdown
pub async fn run_server(config: &AppConfig) -> std::io::Result<()> {
    let ctx = prepare_server_startup(config)
        .await
        .map_err(|e| std::io::Error::other(format!("{:#}", e)))?;

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let store = ctx.store.clone();
    let start_time = ctx.start_time.clone();

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(start_time.clone()))
            .configure(game_routes)
            .configure(review_routes)
            .configure(health_routes)
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_address)?.run().await
}
