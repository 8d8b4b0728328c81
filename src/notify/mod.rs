//! Rank-change notification
//!
//! The ranking side only produces delta lists; relaying them to subscribers
//! is the transport layer's job. `RankChangeNotifier` is the seam between
//! the two. Publish failures are logged and dropped: the materialized
//! leaderboard is the source the transport re-syncs from, and the next
//! recompute republishes any drift.

use chrono::Utc;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use uuid::Uuid;

use crate::{
    constants::RANK_CHANNEL_PREFIX,
    error::AppResult,
    models::RankDelta,
};

/// Outbound collaborator receiving rank/score deltas after a recompute
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RankChangeNotifier: Send + Sync {
    async fn publish(&self, contest_id: &Uuid, deltas: &[RankDelta]) -> AppResult<()>;
}

/// Hand a recompute's deltas to the notifier, skipping empty lists
pub async fn dispatch(
    notifier: &dyn RankChangeNotifier,
    contest_id: &Uuid,
    deltas: &[RankDelta],
) {
    if deltas.is_empty() {
        return;
    }

    if let Err(e) = notifier.publish(contest_id, deltas).await {
        tracing::warn!(
            contest_id = %contest_id,
            error_code = e.error_code(),
            "Failed to publish rank changes: {}",
            e
        );
    }
}

/// Build the JSON payload published for a contest's rank changes
pub fn delta_payload(contest_id: &Uuid, deltas: &[RankDelta]) -> serde_json::Value {
    serde_json::json!({
        "contest_id": contest_id,
        "changes": deltas,
        "published_at": Utc::now(),
    })
}

/// Redis pub/sub notifier
///
/// Publishes one message per recompute to `leaderboard:{contest_id}`; the
/// realtime gateway subscribes and fans out to clients.
#[derive(Clone)]
pub struct RedisNotifier {
    redis: ConnectionManager,
}

impl RedisNotifier {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait::async_trait]
impl RankChangeNotifier for RedisNotifier {
    async fn publish(&self, contest_id: &Uuid, deltas: &[RankDelta]) -> AppResult<()> {
        let channel = format!("{}:{}", RANK_CHANNEL_PREFIX, contest_id);
        let payload = delta_payload(contest_id, deltas).to_string();

        let mut redis = self.redis.clone();
        redis.publish::<_, _, ()>(channel, payload).await?;

        Ok(())
    }
}

/// Log-only notifier for offline runs
pub struct LogNotifier;

#[async_trait::async_trait]
impl RankChangeNotifier for LogNotifier {
    async fn publish(&self, contest_id: &Uuid, deltas: &[RankDelta]) -> AppResult<()> {
        for delta in deltas {
            tracing::info!(
                contest_id = %contest_id,
                competitor_id = %delta.competitor_id,
                old_rank = ?delta.old_rank,
                new_rank = delta.new_rank,
                new_score = delta.new_score,
                "Rank change"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(contest_id: Uuid) -> RankDelta {
        RankDelta {
            contest_id,
            competitor_id: Uuid::new_v4(),
            new_rank: 1,
            old_rank: Some(2),
            new_score: 150,
            old_score: Some(100),
        }
    }

    #[tokio::test]
    async fn test_dispatch_skips_empty_delta_list() {
        let contest_id = Uuid::new_v4();
        let mut notifier = MockRankChangeNotifier::new();
        notifier.expect_publish().never();

        dispatch(&notifier, &contest_id, &[]).await;
    }

    #[tokio::test]
    async fn test_dispatch_publishes_once() {
        let contest_id = Uuid::new_v4();
        let mut notifier = MockRankChangeNotifier::new();
        notifier
            .expect_publish()
            .times(1)
            .returning(|_, _| Ok(()));

        dispatch(&notifier, &contest_id, &[delta(contest_id)]).await;
    }

    #[tokio::test]
    async fn test_dispatch_swallows_publish_failure() {
        let contest_id = Uuid::new_v4();
        let mut notifier = MockRankChangeNotifier::new();
        notifier
            .expect_publish()
            .times(1)
            .returning(|_, _| Err(crate::error::AppError::Redis("down".to_string())));

        // Must not panic or propagate
        dispatch(&notifier, &contest_id, &[delta(contest_id)]).await;
    }

    #[test]
    fn test_payload_shape() {
        let contest_id = Uuid::new_v4();
        let payload = delta_payload(&contest_id, &[delta(contest_id)]);

        assert_eq!(payload["contest_id"], serde_json::json!(contest_id));
        assert_eq!(payload["changes"].as_array().unwrap().len(), 1);
        assert_eq!(payload["changes"][0]["new_rank"], 1);
        assert!(payload["published_at"].is_string());
    }
}
