//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Submission database model
///
/// A competitor's attempt at a problem within a contest. Created by the
/// submission intake (outside this core); only the review pipeline mutates
/// its status, and never once the status is terminal.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub problem_id: Uuid,
    pub competitor_id: Uuid,
    pub status: String,
    pub assigned_reviewer_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Parse the stored status string
    pub fn parsed_status(&self) -> Option<SubmissionStatus> {
        SubmissionStatus::from_str(&self.status)
    }
}

/// Submission status enum
///
/// State machine: `pending -> under_review -> {accepted, rejected}`.
/// Accepted and rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Pending,
    UnderReview,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "under_review" => Some(Self::UnderReview),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Check if this is a terminal status (no transition leaves it)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Check if the transition to `next` is legal
    pub fn can_transition(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::UnderReview)
                | (Self::UnderReview, Self::Accepted)
                | (Self::UnderReview, Self::Rejected)
        )
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::UnderReview,
            SubmissionStatus::Accepted,
            SubmissionStatus::Rejected,
        ] {
            assert_eq!(SubmissionStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(SubmissionStatus::from_str("judging"), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(SubmissionStatus::Accepted.is_terminal());
        assert!(SubmissionStatus::Rejected.is_terminal());
        assert!(!SubmissionStatus::Pending.is_terminal());
        assert!(!SubmissionStatus::UnderReview.is_terminal());
    }

    #[test]
    fn test_transition_table() {
        use SubmissionStatus::*;

        assert!(Pending.can_transition(UnderReview));
        assert!(UnderReview.can_transition(Accepted));
        assert!(UnderReview.can_transition(Rejected));

        // Reviews can only land on claimed submissions
        assert!(!Pending.can_transition(Accepted));
        assert!(!Pending.can_transition(Rejected));

        // No transition leaves a terminal state
        for terminal in [Accepted, Rejected] {
            for next in [Pending, UnderReview, Accepted, Rejected] {
                assert!(!terminal.can_transition(next));
            }
        }
    }
}
