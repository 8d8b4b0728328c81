//! Leaderboard models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Materialized leaderboard entry
///
/// Derived state: the full entry set for a contest is recomputed and
/// overwritten by each ranker run. Ranks are dense (1..N, no gaps, no
/// shared ranks).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub contest_id: Uuid,
    pub competitor_id: Uuid,
    pub rank: i32,
    pub score: i64,
    pub problems_solved: i32,
    pub last_accepted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// A rank or score change produced by a leaderboard recompute
///
/// These records are handed to the rank-change notifier for the transport
/// layer to relay; `old_rank`/`old_score` are absent for competitors who
/// entered the board with this recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankDelta {
    pub contest_id: Uuid,
    pub competitor_id: Uuid,
    pub new_rank: i32,
    pub old_rank: Option<i32>,
    pub new_score: i64,
    pub old_score: Option<i64>,
}
