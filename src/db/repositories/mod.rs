//! Database repositories
//!
//! Repositories encapsulate the SQL for each table. Methods that must run
//! inside the review pipeline's atomic unit take a `PgConnection` so they
//! can participate in the caller's transaction; pool-based methods are for
//! standalone reads.

pub mod aggregate_repo;
pub mod contest_repo;
pub mod leaderboard_repo;
pub mod problem_repo;
pub mod review_repo;
pub mod submission_repo;

pub use aggregate_repo::AggregateRepository;
pub use contest_repo::ContestRepository;
pub use leaderboard_repo::LeaderboardRepository;
pub use problem_repo::ProblemRepository;
pub use review_repo::ReviewRepository;
pub use submission_repo::SubmissionRepository;
