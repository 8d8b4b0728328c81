//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// RANKING DEFAULTS
// =============================================================================

/// Default interval between scheduled full recomputes, in seconds
pub const DEFAULT_RECOMPUTE_INTERVAL_SECONDS: u64 = 60;

/// Default number of attempts for a failed recompute before giving up
/// (the next scheduled pass corrects the board regardless)
pub const DEFAULT_RECOMPUTE_MAX_ATTEMPTS: u32 = 3;

/// Default base backoff between recompute retries, in milliseconds
/// (doubled on each attempt)
pub const DEFAULT_RECOMPUTE_BACKOFF_MS: u64 = 500;

// =============================================================================
// REVIEW DEFAULTS
// =============================================================================

/// Maximum length of a judge's remarks, in characters
pub const MAX_REMARKS_LENGTH: u64 = 4096;

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Submission status identifiers as stored in the database
pub mod statuses {
    pub const PENDING: &str = "pending";
    pub const UNDER_REVIEW: &str = "under_review";
    pub const ACCEPTED: &str = "accepted";
    pub const REJECTED: &str = "rejected";
}

// =============================================================================
// NOTIFICATION CHANNELS
// =============================================================================

/// Prefix for per-contest rank-change pub/sub channels
pub const RANK_CHANNEL_PREFIX: &str = "leaderboard";
