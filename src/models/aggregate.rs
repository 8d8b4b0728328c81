//! Competitor aggregate model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-(contest, competitor) running total
///
/// Invariant: `total_score` equals the sum, over distinct problems the
/// competitor has solved, of the best `score_awarded` among that
/// competitor's accepted submissions for the problem. Created on the first
/// accepted review; mutated only by the review pipeline.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CompetitorAggregate {
    pub contest_id: Uuid,
    pub competitor_id: Uuid,
    pub total_score: i64,
    pub problems_solved: i32,
    pub last_accepted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl CompetitorAggregate {
    /// A zero aggregate, the starting point before any accepted review
    pub fn zero(contest_id: Uuid, competitor_id: Uuid) -> Self {
        Self {
            contest_id,
            competitor_id,
            total_score: 0,
            problems_solved: 0,
            last_accepted_at: None,
            updated_at: Utc::now(),
        }
    }
}
