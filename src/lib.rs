pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod infra;

use actix_web::{middleware, web, App, HttpServer};
use config::AppConfig;
use infra::{init_db, DbPool};

async fn serve(config: AppConfig, pool: web::Data<DbPool>) -> std::io::Result<()> {
    let (host, port) = config.bind_addr();
    log::info!("Listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

pub fn run() -> std::io::Result<()> {
    let config = AppConfig::load().map_err(std::io::Error::other)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    log::info!("DB path: {:?}", config.database_path);
    let pool = init_db(&config.database_path).map_err(|e| {
        log::error!("DB init failed: {}", e);
        std::io::Error::other(e)
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(config, web::Data::new(pool)))
}
