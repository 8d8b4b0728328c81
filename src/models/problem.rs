//! Problem points model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-contest, per-problem maximum achievable score
///
/// Owned by contest management; read-only input used to validate awarded
/// scores.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProblemPoints {
    pub contest_id: Uuid,
    pub problem_id: Uuid,
    pub max_score: i32,
}
