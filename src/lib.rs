//! Themis - Review-to-Ranking Core
//!
//! This library implements the review-to-ranking pipeline of a contest
//! judging platform: processing a judge's verdict on a submission,
//! maintaining competitor aggregates under best-attempt-per-problem
//! semantics, and recomputing deterministic, tie-broken leaderboards.
//!
//! # Pipeline
//!
//! A review arrives -> [`services::ReviewService`] validates it and
//! transactionally updates the submission, review record, and competitor
//! aggregate -> on commit it triggers [`services::RankingService`], which
//! recomputes the contest's standings and hands rank/score deltas to a
//! [`notify::RankChangeNotifier`] for the transport layer to relay.
//!
//! Contest/problem/user management, authentication, and HTTP transport are
//! external collaborators; this crate owns only the records in
//! [`models`] and the pipeline above.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
