//! Best-attempt score aggregation
//!
//! Pure decision logic for updating a competitor's aggregate after an
//! accepted review. Separated from persistence so it can be tested
//! exhaustively without a database; the review service is responsible for
//! atomically persisting the result.

use chrono::{DateTime, Utc};

use crate::models::CompetitorAggregate;

/// Apply an accepted review to a competitor's aggregate.
///
/// `prior_best` is the best score previously awarded to this competitor for
/// the same problem among accepted submissions, or `None` for a first
/// accepted solve.
///
/// Best-attempt-per-problem rules, not sum-of-all-attempts:
/// - first accepted solve: the score joins the total and the solved count
///   grows by one;
/// - a better resubmission replaces the prior best within the total;
/// - a worse or equal resubmission changes nothing, including
///   `last_accepted_at`, which records when the counted score was achieved.
///
/// Rejected reviews never reach this function.
pub fn apply(
    current: &CompetitorAggregate,
    prior_best: Option<i32>,
    new_score: i32,
    accepted_at: DateTime<Utc>,
) -> CompetitorAggregate {
    let mut updated = current.clone();

    match prior_best {
        None => {
            updated.total_score += i64::from(new_score);
            updated.problems_solved += 1;
            updated.last_accepted_at = Some(accepted_at);
        }
        Some(best) if new_score > best => {
            updated.total_score += i64::from(new_score) - i64::from(best);
            updated.last_accepted_at = Some(accepted_at);
        }
        Some(_) => {}
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn aggregate(total: i64, solved: i32) -> CompetitorAggregate {
        CompetitorAggregate {
            total_score: total,
            problems_solved: solved,
            last_accepted_at: if solved > 0 {
                Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap())
            } else {
                None
            },
            ..CompetitorAggregate::zero(Uuid::new_v4(), Uuid::new_v4())
        }
    }

    fn later() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 11, 0, 0).unwrap()
    }

    #[test]
    fn test_first_solve_adds_score_and_count() {
        let current = aggregate(0, 0);
        let updated = apply(&current, None, 60, later());

        assert_eq!(updated.total_score, 60);
        assert_eq!(updated.problems_solved, 1);
        assert_eq!(updated.last_accepted_at, Some(later()));
    }

    #[test]
    fn test_better_resubmission_replaces_prior_best() {
        let current = aggregate(60, 1);
        let updated = apply(&current, Some(60), 90, later());

        assert_eq!(updated.total_score, 90);
        assert_eq!(updated.problems_solved, 1);
        assert_eq!(updated.last_accepted_at, Some(later()));
    }

    #[test]
    fn test_worse_resubmission_changes_nothing() {
        let current = aggregate(90, 1);
        let updated = apply(&current, Some(90), 40, later());

        assert_eq!(updated, current);
    }

    #[test]
    fn test_equal_resubmission_changes_nothing() {
        let current = aggregate(90, 1);
        let updated = apply(&current, Some(90), 90, later());

        assert_eq!(updated, current);
    }

    #[test]
    fn test_first_solve_with_zero_score_still_counts() {
        // A zero-point accepted solve is distinct from no solve at all
        let current = aggregate(0, 0);
        let updated = apply(&current, None, 0, later());

        assert_eq!(updated.total_score, 0);
        assert_eq!(updated.problems_solved, 1);
        assert_eq!(updated.last_accepted_at, Some(later()));
    }

    #[test]
    fn test_second_problem_accumulates() {
        let current = aggregate(90, 1);
        let updated = apply(&current, None, 100, later());

        assert_eq!(updated.total_score, 190);
        assert_eq!(updated.problems_solved, 2);
    }

    #[test]
    fn test_deterministic() {
        let current = aggregate(60, 1);
        let a = apply(&current, Some(60), 75, later());
        let b = apply(&current, Some(60), 75, later());

        assert_eq!(a, b);
    }
}
