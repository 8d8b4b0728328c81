//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod aggregate;
pub mod leaderboard;
pub mod problem;
pub mod review;
pub mod submission;

pub use aggregate::*;
pub use leaderboard::*;
pub use problem::*;
pub use review::*;
pub use submission::*;
