//! Contest repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Repository for the contest shadow table
pub struct ContestRepository;

impl ContestRepository {
    /// Check that a contest exists
    pub async fn exists(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM contests WHERE id = $1)"#)
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// IDs of contests currently inside their running window
    ///
    /// The recompute worker walks this list on every scheduled pass.
    pub async fn active_ids(pool: &PgPool) -> AppResult<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM contests
            WHERE start_time <= NOW() AND end_time >= NOW()
            ORDER BY start_time
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }
}
