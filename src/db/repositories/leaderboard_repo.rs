//! Leaderboard repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::LeaderboardEntry};

/// Repository for materialized leaderboard entries
pub struct LeaderboardRepository;

impl LeaderboardRepository {
    /// List the current entries for a contest, best rank first
    pub async fn list_entries(
        pool: &PgPool,
        contest_id: &Uuid,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT * FROM leaderboard_entries
            WHERE contest_id = $1
            ORDER BY "rank"
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Replace the full entry set for a contest as one transaction
    ///
    /// The entry set is derived state; a failed replace leaves the previous
    /// set intact, so a recompute never makes partial writes.
    pub async fn replace_entries(
        pool: &PgPool,
        contest_id: &Uuid,
        entries: &[LeaderboardEntry],
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        sqlx::query(r#"DELETE FROM leaderboard_entries WHERE contest_id = $1"#)
            .bind(contest_id)
            .execute(&mut *tx)
            .await?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO leaderboard_entries
                    (contest_id, competitor_id, "rank", score, problems_solved, last_accepted_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(entry.contest_id)
            .bind(entry.competitor_id)
            .bind(entry.rank)
            .bind(entry.score)
            .bind(entry.problems_solved)
            .bind(entry.last_accepted_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
