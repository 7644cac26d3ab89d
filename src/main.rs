// src/main.rs

use std::{str::FromStr, sync::Arc, time::Duration};

use dotenvy::dotenv;
use kit_quiz::{
    config::Config,
    routes,
    state::AppState,
    store::{MemoryStore, QuizStore, SqliteStore},
    utils::hash::hash_password,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let store = build_store(&config).await?;

    let admin_password_hash = hash_password(&config.admin_password)?;

    tracing::info!("Schools: {}", config.schools.join(", "));

    let addr = config.bind_addr;
    let state = AppState::new(store, config, admin_password_hash);
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// SQLite when `DATABASE_URL` is set, process memory otherwise.
async fn build_store(config: &Config) -> Result<Arc<dyn QuizStore>, Box<dyn std::error::Error>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let mut retry_count = 0;
    let pool = loop {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    return Err(format!("Failed to open database after 5 retries: {}", e).into());
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    let store = SqliteStore::new(pool);
    tracing::info!("Running migrations...");
    store.migrate().await?;
    tracing::info!("Migrations applied successfully.");

    Ok(Arc::new(store))
}
