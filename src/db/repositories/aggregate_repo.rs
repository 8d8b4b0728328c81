//! Competitor aggregate repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::CompetitorAggregate};

/// Repository for competitor aggregate database operations
pub struct AggregateRepository;

impl AggregateRepository {
    /// Get the aggregate for one competitor in a contest
    pub async fn get(
        pool: &PgPool,
        contest_id: &Uuid,
        competitor_id: &Uuid,
    ) -> AppResult<Option<CompetitorAggregate>> {
        let aggregate = sqlx::query_as::<_, CompetitorAggregate>(
            r#"
            SELECT * FROM competitor_aggregates
            WHERE contest_id = $1 AND competitor_id = $2
            "#,
        )
        .bind(contest_id)
        .bind(competitor_id)
        .fetch_optional(pool)
        .await?;

        Ok(aggregate)
    }

    /// Ensure a zero aggregate row exists, inside the review transaction
    ///
    /// Insert-then-lock rather than upsert: two concurrent first-accepts
    /// both reach the `FOR UPDATE` below and serialize on the same row
    /// instead of overwriting each other.
    pub async fn ensure_exists(
        conn: &mut PgConnection,
        contest_id: &Uuid,
        competitor_id: &Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO competitor_aggregates (contest_id, competitor_id)
            VALUES ($1, $2)
            ON CONFLICT (contest_id, competitor_id) DO NOTHING
            "#,
        )
        .bind(contest_id)
        .bind(competitor_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Lock and fetch the aggregate row, inside the review transaction
    pub async fn find_for_update(
        conn: &mut PgConnection,
        contest_id: &Uuid,
        competitor_id: &Uuid,
    ) -> AppResult<CompetitorAggregate> {
        let aggregate = sqlx::query_as::<_, CompetitorAggregate>(
            r#"
            SELECT * FROM competitor_aggregates
            WHERE contest_id = $1 AND competitor_id = $2
            FOR UPDATE
            "#,
        )
        .bind(contest_id)
        .bind(competitor_id)
        .fetch_one(conn)
        .await?;

        Ok(aggregate)
    }

    /// Write back an updated aggregate, inside the review transaction
    pub async fn update(
        conn: &mut PgConnection,
        aggregate: &CompetitorAggregate,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE competitor_aggregates
            SET total_score = $3,
                problems_solved = $4,
                last_accepted_at = $5,
                updated_at = NOW()
            WHERE contest_id = $1 AND competitor_id = $2
            "#,
        )
        .bind(aggregate.contest_id)
        .bind(aggregate.competitor_id)
        .bind(aggregate.total_score)
        .bind(aggregate.problems_solved)
        .bind(aggregate.last_accepted_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// List aggregates eligible for ranking in a contest
    ///
    /// Competitors with zero solves are excluded from the leaderboard, not
    /// ranked last.
    pub async fn list_ranked(
        pool: &PgPool,
        contest_id: &Uuid,
    ) -> AppResult<Vec<CompetitorAggregate>> {
        let aggregates = sqlx::query_as::<_, CompetitorAggregate>(
            r#"
            SELECT * FROM competitor_aggregates
            WHERE contest_id = $1 AND problems_solved > 0
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(aggregates)
    }
}
