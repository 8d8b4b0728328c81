//! Application state management
//!
//! Shared state handed to whatever embeds this core (worker binary, API
//! layer, tests).

use std::sync::Arc;

use sqlx::PgPool;

use crate::{config::Config, services::RankingService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    db: PgPool,

    /// Leaderboard ranking service
    ranking: Arc<RankingService>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, ranking: Arc<RankingService>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                ranking,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the ranking service handle
    pub fn ranking(&self) -> &Arc<RankingService> {
        &self.inner.ranking
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
