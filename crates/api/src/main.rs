use anyhow::{Context, Result};
use tracing::{error, info};

use cms_admin_api::{app, config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics().context("installing Prometheus recorder")?;

    info!("Starting CMS admin API v{}", env!("CARGO_PKG_VERSION"));

    let db_config = persistence::db::DatabaseConfig::from(&config.database);
    let pool = persistence::db::create_pool(&db_config).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let _pool_metrics = services::spawn_pool_metrics(pool.clone(), services::POOL_METRICS_INTERVAL);

    let addr = config.socket_addr()?;
    let seed_on_startup = config.seed.on_startup;
    let state = app::AppState::new(config, pool);

    if seed_on_startup {
        info!(seed_dir = %state.config.seed.dir.display(), "Seeding defaults");
        if let Err(err) = services::run_seeding(&state).await {
            error!(error = %err, "Seeding defaults failed");
            return Err(err).context("seeding defaults on startup");
        }
    }

    let app = app::router(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
