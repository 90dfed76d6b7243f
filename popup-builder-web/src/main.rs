//! Popup Builder server entry point

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use popup_builder_app::adapters::SqliteStore;
use popup_builder_app::{AppStateBuilder, NoopStartupHooks};
use popup_builder_web::{api, config::Config, logging};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let _log_guard = logging::init(&config.logging)?;

    tracing::info!("Opening popup database at {}", config.database.path.display());
    let store = SqliteStore::new(&config.database.path)
        .await
        .context("Failed to open popup database")?;

    let state = AppStateBuilder::new()
        .popup_repository(Arc::new(store))
        .build()?;
    state
        .run_startup(config.database.seed, &NoopStartupHooks)
        .await?;
    let state = web::Data::new(state);

    let workers = config.server.workers();
    tracing::info!(
        "Listening on http://{}:{} with {workers} workers",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .workers(workers)
    .bind((config.server.host.as_str(), config.server.port))
    .with_context(|| {
        format!(
            "Failed to bind {}:{}",
            config.server.host, config.server.port
        )
    })?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
