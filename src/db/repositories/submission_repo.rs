//! Submission repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    constants::statuses,
    error::AppResult,
    models::Submission,
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Submission>> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(submission)
    }

    /// Find submission by ID with a row lock, inside a transaction
    ///
    /// Serializes concurrent verdicts for the same submission: the second
    /// reviewer blocks here until the first commits, then re-checks against
    /// the terminal status.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: &Uuid,
    ) -> AppResult<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"SELECT * FROM submissions WHERE id = $1 FOR UPDATE"#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(submission)
    }

    /// Set submission status, inside the review transaction
    pub async fn set_status(conn: &mut PgConnection, id: &Uuid, status: &str) -> AppResult<()> {
        sqlx::query(r#"UPDATE submissions SET status = $2 WHERE id = $1"#)
            .bind(id)
            .bind(status)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Atomically claim a pending submission for a reviewer
    ///
    /// Returns the claimed submission, or `None` if it was not in the
    /// pending state (already claimed, already reviewed, or missing).
    pub async fn claim(
        pool: &PgPool,
        id: &Uuid,
        reviewer_id: &Uuid,
    ) -> AppResult<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET status = $3, assigned_reviewer_id = $2
            WHERE id = $1 AND status = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reviewer_id)
        .bind(statuses::UNDER_REVIEW)
        .bind(statuses::PENDING)
        .fetch_optional(pool)
        .await?;

        Ok(submission)
    }
}
