use async_trait::async_trait;
use thiserror::Error;

use crate::models::{FollowEdge, NewReview, Profile, Review, UserId};

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// Storage for the directed follow edge set
///
/// Implementations must make each method a single atomic unit: `insert_edge`
/// may not be split into a lookup followed by an insert.
#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Insert the edge unless it already exists. Returns `false` on a duplicate.
    async fn insert_edge(&self, edge: &FollowEdge) -> Result<bool, StoreError>;

    /// Remove the edge. Returns `true` if something was removed.
    async fn delete_edge(&self, edge: &FollowEdge) -> Result<bool, StoreError>;

    /// Both `a -> b` and `b -> a` exist, read in one consistent snapshot
    async fn is_mutual(&self, a: UserId, b: UserId) -> Result<bool, StoreError>;

    /// Ids followed by `follower_id`, ascending
    async fn following(&self, follower_id: UserId) -> Result<Vec<UserId>, StoreError>;

    /// Ids following `following_id`, ascending
    async fn followers(&self, following_id: UserId) -> Result<Vec<UserId>, StoreError>;
}

/// Storage for reviews
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persist the review only if reviewer and reviewee follow each other.
    ///
    /// The mutuality check and the insert commit together; `None` means the
    /// pair was not mutually connected and nothing was written.
    async fn insert_review_if_mutual(
        &self,
        review: &NewReview,
    ) -> Result<Option<Review>, StoreError>;

    /// Reviews written about `reviewee_id`, newest first
    async fn reviews_for(&self, reviewee_id: UserId) -> Result<Vec<Review>, StoreError>;

    /// Most recent reviews across all users, newest first
    async fn latest_reviews(&self, limit: usize) -> Result<Vec<Review>, StoreError>;
}

/// Read access to roommate profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError>;

    /// Every profile except the one owned by `exclude_user_id`
    async fn candidate_profiles(&self, exclude_user_id: UserId)
        -> Result<Vec<Profile>, StoreError>;
}

#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn health_check(&self) -> Result<bool, StoreError>;
}
