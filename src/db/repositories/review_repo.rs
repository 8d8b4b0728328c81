//! Review repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::Review};

/// Repository for review database operations
pub struct ReviewRepository;

impl ReviewRepository {
    /// Insert the review record, inside the review transaction
    ///
    /// The unique constraint on `submission_id` backstops the one-review-
    /// per-submission invariant; a violation surfaces as a conflict.
    pub async fn insert(
        conn: &mut PgConnection,
        submission_id: &Uuid,
        reviewer_id: &Uuid,
        correct: bool,
        score_awarded: i32,
        remarks: Option<&str>,
    ) -> AppResult<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (submission_id, reviewer_id, correct, score_awarded, remarks)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(submission_id)
        .bind(reviewer_id)
        .bind(correct)
        .bind(score_awarded)
        .bind(remarks)
        .fetch_one(conn)
        .await?;

        Ok(review)
    }

    /// Find the review for a submission
    pub async fn find_by_submission(
        pool: &PgPool,
        submission_id: &Uuid,
    ) -> AppResult<Option<Review>> {
        let review =
            sqlx::query_as::<_, Review>(r#"SELECT * FROM reviews WHERE submission_id = $1"#)
                .bind(submission_id)
                .fetch_optional(pool)
                .await?;

        Ok(review)
    }

    /// Best accepted score for a competitor on a problem, excluding one submission
    ///
    /// Used inside the review transaction to find the prior best before the
    /// submission currently being accepted. `None` means no prior accepted
    /// solve for this problem.
    pub async fn best_accepted_score(
        conn: &mut PgConnection,
        contest_id: &Uuid,
        competitor_id: &Uuid,
        problem_id: &Uuid,
        exclude_submission_id: &Uuid,
    ) -> AppResult<Option<i32>> {
        let best: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT MAX(r.score_awarded)
            FROM reviews r
            JOIN submissions s ON s.id = r.submission_id
            WHERE s.contest_id = $1
              AND s.competitor_id = $2
              AND s.problem_id = $3
              AND s.status = 'accepted'
              AND r.correct
              AND s.id <> $4
            "#,
        )
        .bind(contest_id)
        .bind(competitor_id)
        .bind(problem_id)
        .bind(exclude_submission_id)
        .fetch_one(conn)
        .await?;

        Ok(best)
    }
}
