use std::sync::Arc;

use advocate_directory::{
    core::{db::init_pool, telemetry::init_file_logging},
    init_openapi_route,
    settings::get_config,
    AppState,
};
use poem::listener::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config()?;

    // Logging to File
    let _guard = init_file_logging(&config, "app.log")?;
    tracing::info!(
        "run with config: env={} host={} port={} prefix={}",
        config.env,
        config.host,
        config.port,
        config.prefix()
    );

    // Init Database Connection
    let pool = init_pool(&config)?;
    if pool.is_some() {
        tracing::info!("Init Postgres connection pool");
    }
    // Init App State
    let app_state = Arc::new(AppState { db: pool });

    let app = init_openapi_route(app_state.clone(), &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await?;
    Ok(())
}
