//! Review processing service
//!
//! Orchestrates one judge verdict: validates preconditions, transitions the
//! submission, persists the review, and updates the competitor's aggregate,
//! all inside a single transaction. On success it hands the contest to the
//! ranking service; a ranking failure never rolls back a committed review.

use std::sync::Arc;

use anyhow::anyhow;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::MAX_REMARKS_LENGTH,
    db::repositories::{
        AggregateRepository, ProblemRepository, ReviewRepository, SubmissionRepository,
    },
    error::{AppError, AppResult},
    models::{CompetitorAggregate, Review, Submission, SubmissionStatus},
    services::{RankingService, scoring},
};

/// Inbound review command from the judging UI/API
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitReviewCommand {
    pub submission_id: Uuid,
    pub reviewer_id: Uuid,
    pub correct: bool,
    #[validate(range(min = 0))]
    pub score_awarded: i32,
    #[validate(length(max = MAX_REMARKS_LENGTH))]
    pub remarks: Option<String>,
}

/// Result of a processed review
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub review: Review,
    pub submission: Submission,
    /// Updated aggregate for accepted reviews; `None` for rejections
    pub aggregate: Option<CompetitorAggregate>,
}

/// Review service for the judge verdict pipeline
pub struct ReviewService;

impl ReviewService {
    /// Process a judge's verdict for one submission.
    ///
    /// All persisted effects (status transition, review record, aggregate
    /// update) commit together or not at all. Preconditions are re-checked
    /// under the submission row lock, so of two concurrent verdicts exactly
    /// one commits and the other receives a conflict.
    pub async fn submit_review(
        pool: &PgPool,
        ranking: &Arc<RankingService>,
        cmd: SubmitReviewCommand,
    ) -> AppResult<ReviewOutcome> {
        cmd.validate()?;

        let mut tx = pool.begin().await?;

        let mut submission = SubmissionRepository::find_for_update(&mut *tx, &cmd.submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        check_review_preconditions(&submission, &cmd.reviewer_id)?;

        let max_score =
            ProblemRepository::max_score(&mut *tx, &submission.contest_id, &submission.problem_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Problem not found in contest".to_string()))?;

        check_score_bounds(cmd.score_awarded, max_score)?;

        let next_status = if cmd.correct {
            SubmissionStatus::Accepted
        } else {
            SubmissionStatus::Rejected
        };
        SubmissionRepository::set_status(&mut *tx, &submission.id, next_status.as_str()).await?;
        submission.status = next_status.as_str().to_string();

        let review = ReviewRepository::insert(
            &mut *tx,
            &submission.id,
            &cmd.reviewer_id,
            cmd.correct,
            cmd.score_awarded,
            cmd.remarks.as_deref(),
        )
        .await?;

        // Rejections leave the aggregate untouched
        let aggregate = if cmd.correct {
            Some(Self::apply_accepted_score(&mut *tx, &submission, &review).await?)
        } else {
            None
        };

        tx.commit().await?;

        tracing::info!(
            submission_id = %submission.id,
            contest_id = %submission.contest_id,
            reviewer_id = %cmd.reviewer_id,
            correct = cmd.correct,
            score_awarded = cmd.score_awarded,
            "Review processed"
        );

        // Fire-and-forget: the board catches up asynchronously
        Arc::clone(ranking).schedule_recompute(submission.contest_id);

        Ok(ReviewOutcome {
            review,
            submission,
            aggregate,
        })
    }

    /// Claim a pending submission for review.
    ///
    /// Models the claim-then-review workflow: only the claiming judge may
    /// later post the verdict. The transition is a single conditional
    /// update, so two concurrent claims cannot both succeed.
    pub async fn claim_submission(
        pool: &PgPool,
        submission_id: &Uuid,
        reviewer_id: &Uuid,
    ) -> AppResult<Submission> {
        if let Some(submission) =
            SubmissionRepository::claim(pool, submission_id, reviewer_id).await?
        {
            return Ok(submission);
        }

        // Distinguish a missing submission from one that is past pending
        match SubmissionRepository::find_by_id(pool, submission_id).await? {
            Some(submission) => Err(AppError::Conflict(format!(
                "Submission is {}, not pending",
                submission.status
            ))),
            None => Err(AppError::NotFound("Submission not found".to_string())),
        }
    }

    /// Get the review for a submission
    pub async fn get_review(pool: &PgPool, submission_id: &Uuid) -> AppResult<Review> {
        ReviewRepository::find_by_submission(pool, submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    /// Lock the aggregate row, fold the accepted score in, and write it back
    async fn apply_accepted_score(
        tx: &mut sqlx::PgConnection,
        submission: &Submission,
        review: &Review,
    ) -> AppResult<CompetitorAggregate> {
        AggregateRepository::ensure_exists(tx, &submission.contest_id, &submission.competitor_id)
            .await?;
        let current = AggregateRepository::find_for_update(
            tx,
            &submission.contest_id,
            &submission.competitor_id,
        )
        .await?;

        let prior_best = ReviewRepository::best_accepted_score(
            tx,
            &submission.contest_id,
            &submission.competitor_id,
            &submission.problem_id,
            &submission.id,
        )
        .await?;

        let updated = scoring::apply(
            &current,
            prior_best,
            review.score_awarded,
            review.reviewed_at,
        );
        AggregateRepository::update(tx, &updated).await?;

        Ok(updated)
    }
}

/// Check that the submission is reviewable by this judge.
///
/// Conflicts, each leaving state unchanged: terminal submissions (already
/// reviewed), pending submissions (not claimed), and a reviewer other than
/// the one who claimed it.
fn check_review_preconditions(submission: &Submission, reviewer_id: &Uuid) -> AppResult<()> {
    let status = submission
        .parsed_status()
        .ok_or_else(|| AppError::Internal(anyhow!("Unknown submission status: {}", submission.status)))?;

    match status {
        SubmissionStatus::Accepted | SubmissionStatus::Rejected => Err(AppError::Conflict(
            "Submission has already been reviewed".to_string(),
        )),
        SubmissionStatus::Pending => Err(AppError::Conflict(
            "Submission has not been claimed for review".to_string(),
        )),
        SubmissionStatus::UnderReview => {
            if submission.assigned_reviewer_id.as_ref() == Some(reviewer_id) {
                Ok(())
            } else {
                Err(AppError::Conflict(
                    "Submission is claimed by another reviewer".to_string(),
                ))
            }
        }
    }
}

/// Check the awarded score against the problem's maximum
fn check_score_bounds(score_awarded: i32, max_score: i32) -> AppResult<()> {
    if score_awarded < 0 || score_awarded > max_score {
        return Err(AppError::Validation(format!(
            "Score {} is outside [0, {}]",
            score_awarded, max_score
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn submission(status: &str, assigned_reviewer_id: Option<Uuid>) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            contest_id: Uuid::new_v4(),
            problem_id: Uuid::new_v4(),
            competitor_id: Uuid::new_v4(),
            status: status.to_string(),
            assigned_reviewer_id,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_assigned_reviewer_may_review() {
        let reviewer = Uuid::new_v4();
        let submission = submission("under_review", Some(reviewer));

        assert!(check_review_preconditions(&submission, &reviewer).is_ok());
    }

    #[test]
    fn test_terminal_submission_conflicts() {
        let reviewer = Uuid::new_v4();
        for status in ["accepted", "rejected"] {
            let submission = submission(status, Some(reviewer));
            let err = check_review_preconditions(&submission, &reviewer).unwrap_err();
            assert!(matches!(err, AppError::Conflict(_)));
        }
    }

    #[test]
    fn test_pending_submission_conflicts() {
        let reviewer = Uuid::new_v4();
        let submission = submission("pending", None);

        let err = check_review_preconditions(&submission, &reviewer).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_other_reviewer_conflicts() {
        let claimer = Uuid::new_v4();
        let other = Uuid::new_v4();
        let submission = submission("under_review", Some(claimer));

        let err = check_review_preconditions(&submission, &other).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_score_above_max_rejected() {
        let err = check_score_bounds(150, 100).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert!(check_score_bounds(0, 100).is_ok());
        assert!(check_score_bounds(100, 100).is_ok());
        assert!(check_score_bounds(-1, 100).is_err());
        assert!(check_score_bounds(101, 100).is_err());
    }

    #[test]
    fn test_command_validation_rejects_negative_score() {
        let cmd = SubmitReviewCommand {
            submission_id: Uuid::new_v4(),
            reviewer_id: Uuid::new_v4(),
            correct: true,
            score_awarded: -5,
            remarks: None,
        };

        assert!(cmd.validate().is_err());
    }

    #[test]
    fn test_command_validation_rejects_oversized_remarks() {
        let cmd = SubmitReviewCommand {
            submission_id: Uuid::new_v4(),
            reviewer_id: Uuid::new_v4(),
            correct: true,
            score_awarded: 50,
            remarks: Some("x".repeat(MAX_REMARKS_LENGTH as usize + 1)),
        };

        assert!(cmd.validate().is_err());
    }
}
