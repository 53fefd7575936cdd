use quiz_backend::{
    config::Config,
    database::{cache::create_cache, pool::create_pool},
    routes::create_router,
    services::scheduler::start_scheduler,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.json_logs);

    let pool = create_pool(&config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache = create_cache(&config).await?;
    let addr: SocketAddr = config.server_address.parse()?;
    let sweep_cron = config.sweep_cron.clone();

    let app_state = AppState::new(config, pool, cache);
    let _scheduler = start_scheduler(app_state.completion_sweeper(), &sweep_cron).await?;

    let app = create_router(app_state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
