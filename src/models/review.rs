//! Review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review database model
///
/// A judge's verdict for exactly one submission. At most one review exists
/// per submission (enforced by a unique constraint); reviews are created
/// once and never mutated or deleted by this core.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub reviewer_id: Uuid,
    pub correct: bool,
    pub score_awarded: i32,
    pub remarks: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}
