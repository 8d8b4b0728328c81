//! Problem points repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::ProblemPoints};

/// Repository for per-contest problem point values (read-only input)
pub struct ProblemRepository;

impl ProblemRepository {
    /// Maximum achievable score for a problem in a contest, inside the
    /// review transaction
    pub async fn max_score(
        conn: &mut PgConnection,
        contest_id: &Uuid,
        problem_id: &Uuid,
    ) -> AppResult<Option<i32>> {
        let max_score: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT max_score FROM contest_problems
            WHERE contest_id = $1 AND problem_id = $2
            "#,
        )
        .bind(contest_id)
        .bind(problem_id)
        .fetch_optional(conn)
        .await?;

        Ok(max_score)
    }

    /// List problem point values for a contest
    pub async fn list_for_contest(
        pool: &PgPool,
        contest_id: &Uuid,
    ) -> AppResult<Vec<ProblemPoints>> {
        let points = sqlx::query_as::<_, ProblemPoints>(
            r#"SELECT * FROM contest_problems WHERE contest_id = $1"#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(points)
    }
}
