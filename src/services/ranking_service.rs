//! Leaderboard ranking service
//!
//! Recomputes a contest's full standings from current competitor
//! aggregates. Recompute is idempotent and reads only latest state, so
//! concurrent requests for the same contest coalesce: at most one recompute
//! runs per contest, and at most one follow-up is queued behind it.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::RankingConfig,
    db::repositories::{AggregateRepository, ContestRepository, LeaderboardRepository},
    error::AppResult,
    models::RankDelta,
    notify::{self, RankChangeNotifier},
    services::standings,
};

/// Per-contest recompute flight state
#[derive(Default)]
struct Flight {
    running: bool,
    pending: bool,
}

/// Leaderboard ranking service
pub struct RankingService {
    pool: PgPool,
    notifier: Arc<dyn RankChangeNotifier>,
    config: RankingConfig,
    inflight: DashMap<Uuid, Flight>,
}

impl RankingService {
    /// Create a new ranking service
    pub fn new(pool: PgPool, notifier: Arc<dyn RankChangeNotifier>, config: RankingConfig) -> Self {
        Self {
            pool,
            notifier,
            config,
            inflight: DashMap::new(),
        }
    }

    /// Recompute the full standings for one contest.
    ///
    /// Pure function of the aggregates at read time: loads every aggregate
    /// with at least one solve, ranks deterministically, replaces the
    /// materialized entry set as a unit, and returns the entries whose rank
    /// or score changed. Safe to invoke repeatedly.
    pub async fn recompute(&self, contest_id: &Uuid) -> AppResult<Vec<RankDelta>> {
        if !ContestRepository::exists(&self.pool, contest_id).await? {
            return Err(crate::error::AppError::NotFound(
                "Contest not found".to_string(),
            ));
        }

        let (aggregates, previous) = futures::future::try_join(
            AggregateRepository::list_ranked(&self.pool, contest_id),
            LeaderboardRepository::list_entries(&self.pool, contest_id),
        )
        .await?;

        let entries = standings::rank_aggregates(&aggregates);
        let deltas = standings::diff_entries(&previous, &entries);

        LeaderboardRepository::replace_entries(&self.pool, contest_id, &entries).await?;

        tracing::debug!(
            contest_id = %contest_id,
            entries = entries.len(),
            changed = deltas.len(),
            "Leaderboard recomputed"
        );

        notify::dispatch(self.notifier.as_ref(), contest_id, &deltas).await;

        Ok(deltas)
    }

    /// Request an asynchronous recompute for a contest.
    ///
    /// Returns immediately. If a recompute for the contest is already in
    /// flight, this request coalesces into a single follow-up run instead
    /// of queueing unboundedly. Failures are retried with backoff and never
    /// surface to the caller; the scheduled pass corrects any remainder.
    pub fn schedule_recompute(self: Arc<Self>, contest_id: Uuid) {
        {
            let mut flight = self.inflight.entry(contest_id).or_default();
            if flight.running {
                flight.pending = true;
                return;
            }
            flight.running = true;
        }

        tokio::spawn(async move {
            self.run_flight(contest_id).await;
        });
    }

    /// Recompute every contest currently inside its running window
    pub async fn recompute_active(&self) -> AppResult<()> {
        let contest_ids = ContestRepository::active_ids(&self.pool).await?;

        for contest_id in contest_ids {
            if let Err(e) = self.recompute(&contest_id).await {
                tracing::error!(
                    contest_id = %contest_id,
                    error_code = e.error_code(),
                    "Scheduled recompute failed: {}",
                    e
                );
            }
        }

        Ok(())
    }

    /// Drive one contest's recompute flight until no follow-up is pending
    async fn run_flight(&self, contest_id: Uuid) {
        loop {
            if let Err(e) = self.recompute_with_retry(&contest_id).await {
                tracing::error!(
                    contest_id = %contest_id,
                    error_code = e.error_code(),
                    "Recompute failed, deferring to the next scheduled pass: {}",
                    e
                );
            }

            // The shard lock held by get_mut keeps schedule_recompute from
            // observing a half-updated flight
            let run_again = match self.inflight.get_mut(&contest_id) {
                Some(mut flight) => {
                    if flight.pending {
                        flight.pending = false;
                        true
                    } else {
                        flight.running = false;
                        false
                    }
                }
                None => false,
            };

            if !run_again {
                self.inflight
                    .remove_if(&contest_id, |_, flight| !flight.running && !flight.pending);
                break;
            }
        }
    }

    async fn recompute_with_retry(&self, contest_id: &Uuid) -> AppResult<()> {
        let mut backoff = Duration::from_millis(self.config.backoff_ms);
        let mut attempt = 1;

        loop {
            match self.recompute(contest_id).await {
                Ok(_) => return Ok(()),
                Err(e) if e.is_retryable() && attempt < self.config.max_attempts => {
                    tracing::warn!(
                        contest_id = %contest_id,
                        attempt,
                        "Recompute failed, retrying in {:?}: {}",
                        backoff,
                        e
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
