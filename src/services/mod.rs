//! Business logic services
//!
//! The review pipeline: `scoring` decides what the new aggregate should be,
//! `ReviewService` atomically persists one verdict's effects, `standings`
//! orders and diffs the board, and `RankingService` drives recomputes.

pub mod ranking_service;
pub mod review_service;
pub mod scoring;
pub mod standings;

pub use ranking_service::RankingService;
pub use review_service::{ReviewOutcome, ReviewService, SubmitReviewCommand};
