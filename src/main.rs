//! Themis - Recompute Worker Entry Point
//!
//! Periodically recomputes the leaderboard of every active contest. Review
//! commits already trigger targeted recomputes; this worker is the
//! scheduled safety net that corrects any contest a failed or raced
//! trigger left behind.

use std::sync::Arc;
use std::time::Duration;

use redis::Client as RedisClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use themis::{
    config::CONFIG,
    db,
    notify::RedisNotifier,
    services::RankingService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.worker.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Themis recompute worker...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;
    db::test_connection(&db_pool).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize Redis connection for rank-change fan-out
    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    let notifier = Arc::new(RedisNotifier::new(redis_conn));
    let ranking = Arc::new(RankingService::new(
        db_pool.clone(),
        notifier,
        CONFIG.ranking.clone(),
    ));
    let state = AppState::new(db_pool, ranking, CONFIG.clone());

    let interval = Duration::from_secs(CONFIG.worker.recompute_interval_seconds);
    tracing::info!("Recomputing active contests every {:?}", interval);

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = state.ranking().recompute_active().await {
                    tracing::error!("Recompute pass failed: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
